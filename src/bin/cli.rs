use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rdsguard::config::Config;
use rdsguard::error::GuardError;
use rdsguard::output::OutputFormat;
use rdsguard::rules::RuleEngine;
use rdsguard::AuditOptions;

#[derive(Parser)]
#[command(
    name = "rdsguard",
    about = "Best-practice auditor for managed database instances",
    version,
    author
)]
struct Cli {
    /// Log rule execution to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit DB instances against every enabled rule
    Audit {
        /// Saved `aws rds describe-db-instances` JSON output
        #[arg(long, short = 'i', env = "RDSGUARD_INVENTORY", default_value = "instances.json")]
        inventory: PathBuf,

        /// Config file path
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Output format (console, json, sarif)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// List all registered rules
    ListRules {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .rdsguard.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let footer = failure_footer(&cli.command);
    let result = match cli.command {
        Commands::Audit {
            inventory,
            config,
            format,
            output,
        } => cmd_audit(inventory, config, format, output),
        Commands::ListRules { format } => cmd_list_rules(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(footer) = footer {
                eprintln!("{}", footer);
            }
            process::exit(e.exit_code());
        }
    }
}

/// Extra line printed after a fatal error. Only a failed audit means the
/// fleet was never checked.
fn failure_footer(command: &Commands) -> Option<&'static str> {
    match command {
        Commands::Audit { .. } => Some("Audit not performed."),
        Commands::ListRules { .. } | Commands::Init { .. } => None,
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_audit(
    inventory: PathBuf,
    config: Option<PathBuf>,
    format_str: String,
    output_path: Option<PathBuf>,
) -> Result<i32, GuardError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let options = AuditOptions {
        inventory_path: inventory,
        config_path: config,
    };

    let report = rdsguard::audit(&options)?;
    let rendered = rdsguard::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = all checks OK, 1 = at least one check failed
    Ok(if report.summary.pass { 0 } else { 1 })
}

fn cmd_list_rules(format_str: String) -> Result<i32, GuardError> {
    let engine = RuleEngine::new();
    let rules = engine.list_rules();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&rules)?;
            println!("{}", json);
        }
        _ => {
            println!("{:<12} {:<24} DESCRIPTION", "ID", "NAME");
            println!("{}", "-".repeat(80));
            for rule in &rules {
                println!("{:<12} {:<24} {}", rule.id, rule.name, rule.description);
            }
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, GuardError> {
    let path = PathBuf::from(".rdsguard.toml");

    if path.exists() && !force {
        eprintln!(".rdsguard.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .rdsguard.toml");

    Ok(0)
}
