use std::path::{Path, PathBuf};

use chrono::Datelike;
use clap::{Parser, Subcommand};
use page_widgets_core::{AppConfig, ContactSubmission};
use tracing_subscriber::EnvFilter;

mod scenario;

use scenario::Scenario;

fn main() -> page_widgets_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate { scenario } => run_simulation(&scenario, config),
        Commands::ContactLink {
            name,
            phone,
            message,
        } => {
            let submission = ContactSubmission::new(name, phone.unwrap_or_default(), message);
            run_contact_link(submission, &config)
        }
        Commands::Defaults => {
            println!("{}", serde_json::to_string_pretty(&AppConfig::default())?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> page_widgets_core::Result<AppConfig> {
    match path {
        Some(path) => {
            tracing::info!(?path, "loading configuration");
            AppConfig::from_path(path)
        }
        None => Ok(AppConfig::default()),
    }
}

fn run_simulation(path: &Path, config: AppConfig) -> page_widgets_core::Result<()> {
    tracing::info!(?path, "replaying scenario");
    let scenario = Scenario::from_path(path)?;
    let year = chrono::Local::now().year();

    for report in scenario.run(config, year)? {
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}

fn run_contact_link(
    submission: ContactSubmission,
    config: &AppConfig,
) -> page_widgets_core::Result<()> {
    let url = submission.redirect_url(&config.contact)?;
    println!("{url}");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the landing page widgets", long_about = None)]
struct Cli {
    /// JSON configuration file; built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a scenario against a headless page and print the effects of each step.
    Simulate {
        /// Path to the scenario JSON file.
        scenario: PathBuf,
    },
    /// Print the messaging link the contact form would redirect to.
    ContactLink {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        message: String,
    },
    /// Print the default configuration.
    Defaults,
}
