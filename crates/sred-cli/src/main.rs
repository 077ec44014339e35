mod analyze;
mod display;
mod draft;
mod feedback;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sred_core::{Section, SectionSelector};
use sred_sync::{AiClient, DEFAULT_SERVER_URL};

#[derive(Parser)]
#[command(name = "sred", version, about = "Draft and self-check CRA T661 SR&ED project descriptions")]
struct Cli {
    /// Report AI server base URL.
    #[arg(long, env = "SRED_SERVER_URL", default_value = DEFAULT_SERVER_URL, global = true)]
    server_url: String,

    /// Directory holding the feedback log.
    #[arg(long, env = "SRED_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score Lines 242/244/246 against the compliance rules.
    Analyze {
        /// Line 242 text file.
        #[arg(long)]
        advancement: Option<PathBuf>,
        /// Line 244 text file.
        #[arg(long)]
        uncertainty: Option<PathBuf>,
        /// Line 246 text file.
        #[arg(long)]
        work: Option<PathBuf>,
        /// JSON rule book overriding the built-in rules.
        #[arg(long)]
        rules: Option<PathBuf>,
        /// Print the analysis as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Draft T661 sections from a project JSON file.
    Generate {
        /// Project input JSON (camelCase fields).
        #[arg(long)]
        project: PathBuf,
        /// all, 242, 244 or 246.
        #[arg(long, default_value = "all")]
        section: SectionSelector,
        /// Ask the report AI server instead of using local templates.
        #[arg(long, conflicts_with = "print_prompt")]
        remote: bool,
        /// Print the model prompt for this project instead of drafting.
        #[arg(long)]
        print_prompt: bool,
    },
    /// Suggest improvements for an existing section.
    Improve {
        /// 242, 244 or 246.
        #[arg(long)]
        section: Section,
        /// Text file to improve.
        file: PathBuf,
        /// Ask the report AI server instead of using local hints.
        #[arg(long, conflicts_with = "print_prompt")]
        remote: bool,
        /// Print the model prompt for this text instead of improving it.
        #[arg(long)]
        print_prompt: bool,
    },
    /// Manage reviewer feedback.
    Feedback {
        #[command(subcommand)]
        action: feedback::FeedbackAction,
    },
    /// Check the report AI server.
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("sred v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let client = AiClient::new(cli.server_url.clone());

    match cli.command {
        Command::Analyze {
            advancement,
            uncertainty,
            work,
            rules,
            json,
        } => analyze::run(
            advancement.as_deref(),
            uncertainty.as_deref(),
            work.as_deref(),
            rules.as_deref(),
            json,
        ),
        Command::Generate {
            project,
            section,
            remote,
            print_prompt,
        } => draft::generate(&client, &project, section, remote, print_prompt).await,
        Command::Improve {
            section,
            file,
            remote,
            print_prompt,
        } => draft::improve(&client, &file, section, remote, print_prompt).await,
        Command::Feedback { action } => feedback::run(&client, &cli.data_dir, action).await,
        Command::Health => {
            let health = client.health().await?;
            println!("server:  {}", client.base_url());
            println!("status:  {}", health.status);
            println!("mode:    {}", health.mode);
            println!("model:   {}", if health.model_loaded { "loaded" } else { "not loaded" });
            if let Some(err) = health.model_error {
                println!("reason:  {err}");
            }
            Ok(())
        }
    }
}
