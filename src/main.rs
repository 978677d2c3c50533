use std::fs::File;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use ragchat::api::{Backend, HttpBackend};
use ragchat::core::config::{self, CliOverrides, RagchatConfig};
use ragchat::core::state::App;
use ragchat::{cli, tui};

#[derive(Parser)]
#[command(
    name = "ragchat",
    version,
    about = "Terminal chat client for a retrieval-augmented question-answering backend"
)]
struct Args {
    /// Backend base URL (overrides RAGCHAT_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Per-request timeout in seconds, 0 for none
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log at debug level to ragchat.log
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Ask one question and print the answer with its sources
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Print backend connectivity and knowledge-base size
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // File logger: the TUI owns the terminal, so nothing goes to stderr
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(log_file) = File::create("ragchat.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {e}. Using default configuration.");
        warn!("Falling back to default config: {}", e);
        RagchatConfig::default()
    });
    let overrides = CliOverrides {
        api_url: args.api_url,
        timeout_secs: args.timeout,
    };
    let resolved = config::resolve(&file_config, &overrides);
    info!(
        "ragchat starting (backend: {}, timeout: {:?})",
        resolved.base_url, resolved.request_timeout
    );

    let backend: Arc<dyn Backend> =
        Arc::new(HttpBackend::new(&resolved.base_url, resolved.request_timeout)?);

    match args.command {
        None => tui::run(resolved, backend)?,
        Some(Command::Ask { question }) => {
            let mut app = App::new(resolved.ui);
            if let Some(reply) = cli::ask(&mut app, &*backend, question.join(" ")).await {
                println!("{reply}");
            }
        }
        Some(Command::Status) => {
            let mut app = App::new(resolved.ui);
            println!("{}", cli::status(&mut app, backend).await);
        }
    }
    Ok(())
}
