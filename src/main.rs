//! CLI entry point and command handlers for testproc.

mod cmd;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use testproc::domain::TestType;
use testproc::provider::ProviderKind;
use testproc::render::OutputFormat;
use testproc::validation::MatchMode;

/// Exit code for a completed run whose validation failed
const EXIT_VALIDATION_FAILED: i32 = 2;

#[derive(Parser)]
#[command(name = "testproc")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_SHA"), " ", env!("BUILD_DATE"), ")"))]
#[command(about = "Generate and validate FAT/SAT test procedures", long_about = None)]
#[command(
    after_help = "GETTING STARTED:\n    testproc sample > project.json     Write the sample project\n    testproc check project.json        Check the project definition\n    testproc generate project.json     Generate, validate and render a procedure"
)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Use this config file instead of the global and project configs
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a procedure for a project, validate it and render it
    Generate {
        /// Project definition (JSON, or YAML by extension)
        project: PathBuf,
        /// Test type (FAT, SAT, IQ, OQ)
        #[arg(long, short = 't')]
        test_type: Option<TestType>,
        /// Text provider (mock, live)
        #[arg(long)]
        provider: Option<ProviderKind>,
        /// Prompt template version
        #[arg(long)]
        prompt_version: Option<String>,
        /// Output directory
        #[arg(long, short = 'o', value_name = "DIR")]
        out: Option<PathBuf>,
        /// Output format (html, markdown)
        #[arg(long)]
        format: Option<OutputFormat>,
        /// Render the document even when validation fails
        #[arg(long)]
        allow_failed: bool,
        /// Print metadata and validation result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate an existing procedure against a project
    Validate {
        /// Project definition (JSON, or YAML by extension)
        project: PathBuf,
        /// Procedure text to check ('-' reads stdin)
        content: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Promote content warnings to errors when coverage is incomplete
        #[arg(long)]
        strict: bool,
        /// How signal IDs are matched (token, substring)
        #[arg(long)]
        match_mode: Option<MatchMode>,
    },
    /// Check and lint a project definition
    Check {
        /// Project definition (JSON, or YAML by extension)
        project: PathBuf,
    },
    /// List available prompt versions
    Prompts,
    /// Print the sample project definition
    Sample,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_VALIDATION_FAILED),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Level from `-v` count, unless `RUST_LOG` carries directives of its own.
fn log_filter(verbosity: u8, rust_log: Option<&str>) -> EnvFilter {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        return EnvFilter::new(directives);
    }

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    EnvFilter::default().add_directive(level.into())
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(verbosity, rust_log.as_deref());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Run the selected command. `Ok(false)` means the command completed but
/// validation failed.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            project,
            test_type,
            provider,
            prompt_version,
            out,
            format,
            allow_failed,
            json,
        } => {
            let config = cmd::load_config(cli.config.as_deref())?;
            cmd::generate::cmd_generate(
                &config,
                cmd::generate::GenerateArgs {
                    project,
                    test_type,
                    provider,
                    prompt_version,
                    out,
                    format,
                    allow_failed,
                    json,
                },
            )
        }
        Commands::Validate {
            project,
            content,
            json,
            strict,
            match_mode,
        } => {
            let config = cmd::load_config(cli.config.as_deref())?;
            cmd::validate::cmd_validate(&config, &project, &content, json, strict, match_mode)
        }
        Commands::Check { project } => cmd::project::cmd_check(&project),
        Commands::Prompts => cmd::prompts::cmd_prompts().map(|_| true),
        Commands::Sample => cmd::project::cmd_sample().map(|_| true),
        Commands::Completions { shell } => cmd_completion(shell).map(|_| true),
    }
}

fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "testproc", &mut io::stdout());
    Ok(())
}
