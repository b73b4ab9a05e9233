use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use recall_planner::api::{self, AppState};
use recall_planner::config::Config;
use recall_planner::db::Database;
use recall_planner::llm::ChatClient;
use recall_planner::recap;

#[derive(Parser)]
#[command(name = "recall")]
#[command(about = "Spaced-repetition learning log and AI-assisted planner")]
struct Cli {
    /// Directory holding learning_data.json and planning_data.json
    #[arg(long, global = true, env = "RECALL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
    /// Print items due for recap on a date
    Due {
        /// YYYY-MM-DD, defaults to today
        date: Option<String>,
    },
    /// Print upcoming recap days
    Schedule {
        /// First day, YYYY-MM-DD, defaults to today
        #[arg(long)]
        from: Option<String>,
        /// Number of days to look ahead
        #[arg(long, default_value = "30")]
        days: u32,
    },
}

/// Initialize tracing with output to stderr (for query commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "recall_planner=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // Query commands print JSON to stdout
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn serve(config: Config, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting Recall Planner server on port {}", port);

    let db = Database::open(&config.data)?;
    let client = ChatClient::new(&config.llm)?;
    if config.llm.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; AI endpoints will fail");
    }

    let state = AppState::new(db, Arc::new(client), &config.llm.default_model);
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!(
        "Recall Planner listening on http://127.0.0.1:{} (data: {})",
        port,
        config.data.learning_file.display()
    );

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = !matches!(cli.command, None | Some(Commands::Serve { .. }));
    init_tracing(use_stderr);

    let mut config = Config::from_env()?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Serve { port }) => serve(config, port).await?,
        None => serve(config, 8000).await?,
        Some(Commands::Due { date }) => {
            let date = recap::parse_date_or(date.as_deref(), today)?;
            let db = Database::open(&config.data)?;
            let due = db.get_due_learnings(date)?;
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        Some(Commands::Schedule { from, days }) => {
            let from = recap::parse_date_or(from.as_deref(), today)?;
            let db = Database::open(&config.data)?;
            let schedule = db.get_recap_schedule(from, days)?;
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
    }

    Ok(())
}
