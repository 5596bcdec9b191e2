//! Configuration file loading and discovery.
//!
//! Merge configuration is read from YAML with automatic discovery.

use super::types::MergeConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".sbom-assembler.yaml",
    ".sbom-assembler.yml",
    "sbom-assembler.yaml",
    "sbom-assembler.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/sbom-assembler/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    if let Some(git_root) = find_git_root() {
        if let Some(path) = find_config_in_dir(&git_root) {
            return Some(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("sbom-assembler")) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load a `MergeConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<MergeConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: MergeConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from a discovered file, or return defaults.
///
/// An explicit path that fails to load is an error; a discovered file that
/// fails to parse is logged and ignored.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(MergeConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        return load_config_file(path).map(|config| (config, Some(path.to_path_buf())));
    }

    Ok(discover_config_file(None).map_or_else(
        || (MergeConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (MergeConfig::default(), None)
            }
        },
    ))
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl MergeConfig {
    /// Layer command-line values over file values; `other` wins where set.
    pub fn merge(&mut self, other: &Self) {
        let app = &other.app;
        if !app.name.is_empty() {
            self.app.name.clone_from(&app.name);
        }
        if !app.version.is_empty() {
            self.app.version.clone_from(&app.version);
        }
        if !app.description.is_empty() {
            self.app.description.clone_from(&app.description);
        }
        if !app.primary_purpose.is_empty() {
            self.app.primary_purpose.clone_from(&app.primary_purpose);
        }
        if !app.supplier.is_empty() {
            self.app.supplier.clone_from(&app.supplier);
        }
        if !app.authors.is_empty() {
            self.app.authors.clone_from(&app.authors);
        }

        if !other.input.files.is_empty() {
            self.input.files.clone_from(&other.input.files);
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if other.assemble.flat_merge {
            self.assemble.flat_merge = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::io::Write;

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "app:\n  name: fleet\ninput:\n  files: [a.json]").unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.app.name, "fleet");
        assert_eq!(config.input.files, vec![PathBuf::from("a.json")]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config_file(Path::new("/nonexistent/sbom-assembler.yaml")).unwrap_err();
        assert!(matches!(err, ConfigFileError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "app: [unterminated").unwrap();
        assert!(matches!(
            load_config_file(file.path()),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_explicit_path_failure_is_error() {
        assert!(load_or_default(Some(Path::new("/nonexistent/x.yaml"))).is_err());
    }

    #[test]
    fn test_find_config_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_config_in_dir(dir.path()).is_none());

        std::fs::write(dir.path().join("sbom-assembler.yaml"), "app: {}\n").unwrap();
        let found = find_config_in_dir(dir.path()).unwrap();
        assert!(found.ends_with("sbom-assembler.yaml"));
    }

    #[test]
    fn test_merge_cli_over_file() {
        let mut base = MergeConfig::default();
        base.app.name = "from-file".to_string();
        base.app.version = "1.0".to_string();
        base.input.files = vec![PathBuf::from("a.json")];

        let mut cli = MergeConfig::default();
        cli.app.version = "2.0".to_string();
        cli.assemble.flat_merge = true;

        base.merge(&cli);
        assert_eq!(base.app.name, "from-file");
        assert_eq!(base.app.version, "2.0");
        assert_eq!(base.input.files.len(), 1);
        assert!(base.assemble.flat_merge);
    }

    #[test]
    fn test_explicit_cli_format_wins_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output:\n  format: yaml").unwrap();
        let mut base = load_config_file(file.path()).unwrap();
        assert_eq!(base.output.format(), OutputFormat::Yaml);

        // no --format keeps the file's choice
        base.merge(&MergeConfig::default());
        assert_eq!(base.output.format(), OutputFormat::Yaml);

        let mut cli = MergeConfig::default();
        cli.output.format = Some(OutputFormat::Json);
        base.merge(&cli);
        assert_eq!(base.output.format(), OutputFormat::Json);
    }
}
