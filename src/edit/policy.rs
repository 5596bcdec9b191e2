//! Update policy: how a configured value combines with what is already there.
//!
//! One strategy covers every field. Scalars go through
//! [`Policy::apply_scalar`], whole lists through [`Policy::apply_list`], and
//! lists with a per-entry kind (external references) through
//! [`Policy::apply_keyed`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Update policy for field edits
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Set only when the current value is empty/absent
    Missing,
    /// Add to collections without removing existing entries
    Append,
    /// Replace the current value outright
    #[default]
    Overwrite,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Append => write!(f, "append"),
            Self::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// A value slot that can be "unset".
pub trait Unset {
    fn is_unset(&self) -> bool;
}

impl Unset for String {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Unset for Option<T> {
    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

impl<T> Unset for Vec<T> {
    fn is_unset(&self) -> bool {
        self.is_empty()
    }
}

impl Policy {
    /// Apply to a single-valued slot. `Append` on a scalar replaces.
    ///
    /// Returns true if the slot was written.
    pub fn apply_scalar<T: Unset>(self, slot: &mut T, value: T) -> bool {
        match self {
            Self::Missing if !slot.is_unset() => false,
            _ => {
                *slot = value;
                true
            }
        }
    }

    /// Apply to a whole list.
    pub fn apply_list<T>(self, slot: &mut Vec<T>, values: Vec<T>) -> bool {
        match self {
            Self::Missing => {
                if slot.is_empty() {
                    *slot = values;
                    true
                } else {
                    false
                }
            }
            Self::Append => {
                slot.extend(values);
                true
            }
            Self::Overwrite => {
                *slot = values;
                true
            }
        }
    }

    /// Apply one entry to a list where `same_kind` identifies entries of the
    /// entry's kind.
    ///
    /// `Missing` adds only if no entry of that kind exists. `Append` always
    /// adds, even when that leaves several entries of one kind. `Overwrite`
    /// removes every entry of the kind, then adds exactly one.
    pub fn apply_keyed<T>(self, list: &mut Vec<T>, value: T, same_kind: impl Fn(&T) -> bool) -> bool {
        match self {
            Self::Missing => {
                if list.iter().any(&same_kind) {
                    false
                } else {
                    list.push(value);
                    true
                }
            }
            Self::Append => {
                list.push(value);
                true
            }
            Self::Overwrite => {
                list.retain(|entry| !same_kind(entry));
                list.push(value);
                true
            }
        }
    }
}
