//! bom-tools: reference-designator based BOM and netlist diff tool
//!
//! Compares two revisions of a BOM export or netlist and reports added,
//! removed and changed components.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use bom_tools::{
    cli,
    config::{
        file::{user_config_dir, CONFIG_FILE_NAMES},
        AppConfig, BehaviorConfig, ConfigPreset, DiffConfig, DiffPaths, ExtractionConfig,
        OutputConfig, ReconciliationConfig, ViewConfig,
    },
    diff::DuplicatePolicy,
    model::FileKind,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported Inputs:",
        "\n  bom-xml:      DETAILS/RECORD or Component element layouts",
        "\n  csv:          reference, value, quantity, description, manufacturer, part number",
        "\n  netlist-text: NET REF:PIN REF:PIN ...",
        "\n\nOutput Formats:",
        "\n  text, json, csv, html"
    )
}

#[derive(Parser)]
#[command(name = "bom-tools")]
#[command(author = "Binarly.io")]
#[command(version, long_version = build_long_version())]
#[command(about = "Reference-designator based BOM and netlist diff tool", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success (or changes found without --fail-on-change)
    1  Changes detected (--fail-on-change)
    2  Validation warnings present (--fail-on-warning)
    3  Error occurred

EXAMPLES:
    # Compare two BOM revisions
    bom-tools diff rev_a.xml rev_b.xml

    # CI check: JSON report, non-zero exit on any change
    bom-tools diff rev_a.xml rev_b.xml -o json --fail-on-change

    # Export an HTML report (format taken from the extension)
    bom-tools diff rev_a.csv rev_b.csv -O diff.html

    # List the components of a netlist
    bom-tools view board.net")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start from a named preset (default, strict, ci-cd)
    #[arg(long, global = true, value_parser = parse_preset)]
    preset: Option<ConfigPreset>,

    #[command(subcommand)]
    command: Commands,
}

fn parse_preset(name: &str) -> std::result::Result<ConfigPreset, String> {
    ConfigPreset::from_name(name).ok_or_else(|| {
        let names: Vec<_> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
        format!("unknown preset '{name}' (expected one of: {})", names.join(", "))
    })
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Path to the old/baseline file
    old: PathBuf,

    /// Path to the new file
    new: PathBuf,

    /// Output format (auto picks from the output file extension, text otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Kind of the old file (sniffed from name and content if omitted)
    #[arg(long)]
    old_kind: Option<FileKind>,

    /// Kind of the new file (sniffed from name and content if omitted)
    #[arg(long)]
    new_kind: Option<FileKind>,

    /// Kind of both files
    #[arg(long, conflicts_with_all = ["old_kind", "new_kind"])]
    kind: Option<FileKind>,

    /// How repeated reference designators are resolved
    #[arg(long)]
    duplicates: Option<DuplicatePolicy>,

    /// List unchanged components as well
    #[arg(long)]
    include_unchanged: bool,

    /// Fail on malformed input instead of treating it as empty
    #[arg(long)]
    strict: bool,

    /// Skip the first row of CSV inputs
    #[arg(long)]
    skip_header: bool,

    /// Report title
    #[arg(long)]
    title: Option<String>,

    /// Compact JSON output
    #[arg(long)]
    compact: bool,

    /// Also emit addedComponents/deletedComponents/changedComponents in JSON
    #[arg(long)]
    legacy_keys: bool,

    /// Exit with code 1 if any changes are detected
    #[arg(long)]
    fail_on_change: bool,

    /// Exit with code 2 if validation warnings are produced
    #[arg(long)]
    fail_on_warning: bool,
}

/// Arguments for the `view` subcommand
#[derive(Parser)]
struct ViewArgs {
    /// Path to the BOM or netlist file
    file: PathBuf,

    /// Output format (auto picks from the output file extension, text otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Kind of the file (sniffed from name and content if omitted)
    #[arg(long)]
    kind: Option<FileKind>,

    /// Fail on malformed input instead of treating it as empty
    #[arg(long)]
    strict: bool,

    /// Skip the first row of a CSV input
    #[arg(long)]
    skip_header: bool,

    /// Compact JSON output
    #[arg(long)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two BOM or netlist files
    Diff(DiffArgs),

    /// List the components of a single file
    View(ViewArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (preset, then file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .bom-tools.yaml in the current directory
    Init,
}

/// Preset, then config file, then `overrides`.
fn effective_config(cli: &Cli, overrides: &AppConfig) -> AppConfig {
    let (config, loaded_from) = AppConfig::layered(cli.preset, cli.config.as_deref(), overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    config
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
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

    match run(cli) {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Diff(ref args) => {
            let overrides = AppConfig {
                extraction: ExtractionConfig {
                    strict: args.strict,
                    skip_header: args.skip_header,
                },
                reconciliation: ReconciliationConfig {
                    duplicate_policy: args.duplicates.unwrap_or_default(),
                    include_unchanged: args.include_unchanged,
                },
                output: OutputConfig {
                    format: args.output,
                    file: args.output_file.clone(),
                    title: args.title.clone(),
                    no_color: cli.no_color,
                    pretty: !args.compact,
                    legacy_keys: args.legacy_keys,
                },
                behavior: BehaviorConfig {
                    fail_on_change: args.fail_on_change,
                    fail_on_warning: args.fail_on_warning,
                    quiet: cli.quiet,
                },
            };
            let mut app = effective_config(&cli, &overrides);
            // An explicit --duplicates last-wins must beat a file or preset value
            if let Some(policy) = args.duplicates {
                app.reconciliation.duplicate_policy = policy;
            }

            let config = DiffConfig::from_app(
                DiffPaths {
                    old: args.old.clone(),
                    new: args.new.clone(),
                },
                &app,
            )
            .with_kinds(args.kind.or(args.old_kind), args.kind.or(args.new_kind));

            cli::run_diff(config)
        }

        Commands::View(ref args) => {
            let overrides = AppConfig::builder()
                .strict(args.strict)
                .skip_header(args.skip_header)
                .output_format(args.output)
                .output_file(args.output_file.clone())
                .no_color(cli.no_color)
                .quiet(cli.quiet)
                .build();
            let mut app = effective_config(&cli, &overrides);
            if args.compact {
                app.output.pretty = false;
            }

            let mut config = ViewConfig::from_app(args.file.clone(), &app);
            config.kind = args.kind;
            cli::run_view(config)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "bom-tools", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { ref output } => {
            let schema =
                bom_tools::config::generate_json_schema().context("failed to serialize schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { ref action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    AppConfig::layered(cli.preset, cli.config.as_deref(), &AppConfig::default());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Path => {
                let search_paths: [Option<String>; 3] = [
                    std::env::current_dir()
                        .ok()
                        .map(|p| p.display().to_string()),
                    user_config_dir().map(|p| p.display().to_string()),
                    dirs::home_dir().map(|p| p.display().to_string()),
                ];
                eprintln!("Config file search paths (in order):");
                for path in search_paths.into_iter().flatten() {
                    eprintln!("  {path}");
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match bom_tools::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".bom-tools.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = bom_tools::config::generate_full_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
