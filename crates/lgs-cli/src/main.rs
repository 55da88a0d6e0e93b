//! lgs CLI: Command-line front end of the LGS score dashboard.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use lgs_core::api::RecommendationType;

mod commands;

#[derive(Parser)]
#[command(name = "lgs", version, about = "LGS score dashboard client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check an answer sheet against the subject quotas
    Validate {
        /// Path to the answer sheet TOML
        #[arg(long)]
        sheet: PathBuf,

        /// Field being edited, e.g. "matematik_dogru"
        #[arg(long)]
        focus: Option<String>,

        /// Write the clamped values back to the sheet
        #[arg(long)]
        fix: bool,

        /// Exit code 1 if any value had to be clamped
        #[arg(long)]
        strict: bool,
    },

    /// Submit an answer sheet for scoring
    Calculate {
        /// Path to the answer sheet TOML
        #[arg(long)]
        sheet: PathBuf,

        /// Count the results up on the terminal
        #[arg(long)]
        animate: bool,

        /// Also write the result panel to this HTML file
        #[arg(long)]
        html: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show score history and subject performance
    Analytics {
        /// Also write the statistics and subject chart to this HTML file
        #[arg(long)]
        html: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Ask for an AI recommendation
    Recommend {
        /// study_plan, improvement, or motivation
        #[arg(long, default_value = "study_plan")]
        kind: RecommendationType,

        /// Also write the panel to this HTML file
        #[arg(long)]
        html: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Log in and store the session cookie in the config file
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        /// Config file to update (default: ./lgs.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and an example answer sheet
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lgs=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate {
            sheet,
            focus,
            fix,
            strict,
        } => commands::validate::execute(sheet, focus, fix, strict),
        Commands::Calculate {
            sheet,
            animate,
            html,
            config,
        } => commands::calculate::execute(sheet, animate, html, config).await,
        Commands::Analytics { html, config } => commands::analytics::execute(html, config).await,
        Commands::Recommend { kind, html, config } => {
            commands::recommend::execute(kind, html, config).await
        }
        Commands::Login {
            username,
            password,
            config,
        } => commands::login::execute(username, password, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
