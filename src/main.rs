//! sbom-assembler: edit and merge SPDX SBOMs
//!
//! Command-line front end for the edit and merge engines.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use sbom_assembler::{
    cli,
    config::{
        AppMetadata, AssembleConfig, EditConfig, FieldValues, HashSpec, InputConfig, LicenseSpec,
        MergeConfig, NameValue, OutputConfig, OutputFormat, SearchSpec, Subject, ToolIdentity,
    },
    edit::Policy,
    pipeline::{exit_codes, OutputTarget},
    Validatable,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sbom-assembler")]
#[command(version)]
#[command(about = "Edit and merge SPDX SBOMs", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Error occurred
    2  Invalid configuration

EXAMPLES:
    # Fill in a missing supplier on the primary component
    sbom-assembler edit app.spdx.json --subject primary-component --missing \\
        --supplier \"Acme (https://acme.io)\" -o app.edited.spdx.json

    # Merge two SBOMs under a new root component
    sbom-assembler merge -n fleet --version 2.0 a.spdx.json b.spdx.json -o fleet.spdx.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `edit` subcommand
#[derive(Args)]
struct EditArgs {
    /// SBOM to edit
    input: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Element to edit: document, primary-component, component-name-version
    #[arg(long, default_value = "document")]
    subject: Subject,

    /// Component name to search for (component-name-version)
    #[arg(long)]
    search_name: Option<String>,

    /// Component version to search for (component-name-version)
    #[arg(long)]
    search_version: Option<String>,

    /// Update policy
    #[arg(long, value_enum, default_value_t = Policy::Overwrite, conflicts_with_all = ["missing", "append"])]
    policy: Policy,

    /// Only set fields that are currently empty (same as --policy missing)
    #[arg(long, conflicts_with = "append")]
    missing: bool,

    /// Add to list fields instead of replacing (same as --policy append)
    #[arg(long)]
    append: bool,

    /// Component name
    #[arg(long)]
    name: Option<String>,

    /// Component version
    #[arg(long = "version")]
    version_value: Option<String>,

    /// Supplier, as "Name (url or email)"
    #[arg(long)]
    supplier: Option<NameValue>,

    /// Document author, as "Name (email)" (repeatable)
    #[arg(long = "author")]
    authors: Vec<NameValue>,

    /// Package URL
    #[arg(long)]
    purl: Option<String>,

    /// CPE 2.3 identifier
    #[arg(long)]
    cpe: Option<String>,

    /// License id or expression (repeatable; joined with OR)
    #[arg(long = "license")]
    licenses: Vec<LicenseSpec>,

    /// Checksum, as "ALGORITHM (value)" (repeatable)
    #[arg(long = "hash")]
    hashes: Vec<HashSpec>,

    /// Tool, as "name (version)" (repeatable)
    #[arg(long = "tool")]
    tools: Vec<NameValue>,

    /// Copyright text
    #[arg(long)]
    copyright: Option<String>,

    /// Lifecycle stages (comma-separated or repeated)
    #[arg(long = "lifecycle", value_delimiter = ',')]
    lifecycles: Vec<String>,

    /// Description (document comment or component description)
    #[arg(long)]
    description: Option<String>,

    /// Repository / download location
    #[arg(long)]
    repository: Option<String>,

    /// Primary purpose (application, library, firmware, ...)
    #[arg(long = "type")]
    primary_purpose: Option<String>,
}

impl EditArgs {
    fn policy(&self) -> Policy {
        if self.missing {
            Policy::Missing
        } else if self.append {
            Policy::Append
        } else {
            self.policy
        }
    }

    fn into_config(self) -> EditConfig {
        let policy = self.policy();
        EditConfig {
            search: SearchSpec {
                subject: self.subject,
                name: self.search_name,
                version: self.search_version,
            },
            policy,
            fields: FieldValues {
                name: self.name,
                version: self.version_value,
                supplier: self.supplier,
                authors: self.authors,
                purl: self.purl,
                cpe: self.cpe,
                licenses: self.licenses,
                hashes: self.hashes,
                tools: self.tools,
                copyright: self.copyright,
                lifecycles: self.lifecycles,
                description: self.description,
                repository: self.repository,
                primary_purpose: self.primary_purpose,
            },
        }
    }
}

/// Arguments for the `merge` subcommand
#[derive(Args)]
struct MergeArgs {
    /// SBOMs to merge, in order (replaces any listed in the config file)
    inputs: Vec<PathBuf>,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Name of the merged product (root component)
    #[arg(short, long)]
    name: Option<String>,

    /// Version of the merged product
    #[arg(long = "version")]
    version_value: Option<String>,

    /// Collapse inputs without a root component (not implemented)
    #[arg(long)]
    flat: bool,
}

impl MergeArgs {
    fn into_config(self) -> MergeConfig {
        MergeConfig {
            app: AppMetadata {
                name: self.name.unwrap_or_default(),
                version: self.version_value.unwrap_or_default(),
                ..Default::default()
            },
            input: InputConfig { files: self.inputs },
            output: OutputConfig {
                file: self.output,
                format: self.format,
            },
            assemble: AssembleConfig {
                flat_merge: self.flat,
            },
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Edit fields of an SBOM or one of its components
    Edit(EditArgs),

    /// Merge several SBOMs under a new root component
    Merge(MergeArgs),

    /// Print an example merge configuration file
    GenerateConfig {
        /// Write to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn tool_identity() -> ToolIdentity {
    ToolIdentity::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn exit_if_invalid(config: &impl Validatable) {
    let errors = config.validate();
    if errors.is_empty() {
        return;
    }
    for error in &errors {
        eprintln!("error: {error}");
    }
    std::process::exit(exit_codes::INVALID_CONFIG);
}

fn write_text(content: &str, output: Option<PathBuf>, what: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("{what} written to {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the document
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match cli.command {
        Commands::Edit(args) => {
            let input = args.input.clone();
            let target = OutputTarget::from_option(args.output.clone());
            let format = args.format;
            let config = args.into_config();
            exit_if_invalid(&config);
            cli::run_edit(&input, &target, format, config, tool_identity(), cli.quiet)?;
            Ok(())
        }

        Commands::Merge(args) => {
            let (mut config, loaded_from) =
                sbom_assembler::config::load_or_default(cli.config.as_deref())
                    .context("failed to load configuration")?;
            if let Some(path) = &loaded_from {
                tracing::debug!("Loaded config from {}", path.display());
            }
            // command-line values win over the config file
            config.merge(&args.into_config());
            exit_if_invalid(&config);

            cli::run_merge(&config, tool_identity(), cli.quiet)?;
            Ok(())
        }

        Commands::GenerateConfig { output } => write_text(
            &sbom_assembler::config::generate_example_config(),
            output,
            "Example config",
        ),

        Commands::ConfigSchema { output } => {
            let schema = sbom_assembler::config::generate_json_schema()
                .context("failed to generate schema")?;
            write_text(&schema, output, "Schema")
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "sbom-assembler", &mut io::stdout());
            Ok(())
        }
    }
}
