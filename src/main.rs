use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use protoscout::report::ReportFormat;
use protoscout::types::Requirement;

/// Parse a communication requirement from string
fn parse_requirement(s: &str) -> Result<Requirement, String> {
    Requirement::from_str(s)
}

/// Parse a report format from string
fn parse_format(s: &str) -> Result<ReportFormat, String> {
    ReportFormat::from_str(s)
}

#[derive(Parser)]
#[command(name = "protoscout")]
#[command(
    version,
    about = "Analyze communication protocol usage and recommend the simplest option"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a project for protocol usage
    Analyze {
        #[arg(help = "Path to the project directory")]
        path: PathBuf,
        #[arg(
            long,
            short,
            value_parser = parse_requirement,
            help = "Communication requirement: realtime, request-response, streaming, rpc"
        )]
        requirement: Option<Requirement>,
        #[arg(
            long,
            short,
            value_parser = parse_format,
            help = "Output format: text, json, markdown (default: from config)"
        )]
        format: Option<ReportFormat>,
        #[arg(long, short, help = "Write the report to a file instead of stdout")]
        output: Option<PathBuf>,
    },

    /// Compare protocols side by side
    Compare {
        #[arg(required = true, help = "Protocols to compare (e.g. websocket socket.io)")]
        protocols: Vec<String>,
        #[arg(
            long,
            short,
            default_value = "text",
            value_parser = parse_format,
            help = "Output format: text, json, markdown"
        )]
        format: ReportFormat,
    },

    /// Show a migration guide between two protocols
    Migrate {
        #[arg(help = "Source protocol")]
        from: String,
        #[arg(help = "Target protocol")]
        to: String,
        #[arg(
            long,
            short,
            default_value = "text",
            value_parser = parse_format,
            help = "Output format: text, json, markdown"
        )]
        format: ReportFormat,
    },

    /// List all known protocols
    List {
        #[arg(
            long,
            short,
            value_parser = parse_requirement,
            help = "Filter by category: realtime, request-response, streaming, rpc"
        )]
        category: Option<protoscout::types::Category>,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mprotoscout encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        eprintln!("\n\x1b[33mPlease report this issue at:\x1b[0m");
        eprintln!("  https://github.com/protoscout/protoscout/issues");
        eprintln!();

        // Default hook prints the backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Analyze {
            path,
            requirement,
            format,
            output,
        } => {
            protoscout::cli::commands::analyze::run(
                protoscout::cli::commands::analyze::AnalyzeOptions {
                    path,
                    requirement,
                    format,
                    output,
                },
            )?;
        }
        Commands::Compare { protocols, format } => {
            protoscout::cli::commands::compare::run(&protocols, format)?;
        }
        Commands::Migrate { from, to, format } => {
            protoscout::cli::commands::migrate::run(&from, &to, format)?;
        }
        Commands::List { category } => {
            protoscout::cli::commands::list::run(category)?;
        }
    }

    Ok(())
}
