use clap::Parser;
use support_core::{ConversationStore, SupportConfig};
use tokio::sync::broadcast;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "support.toml")]
    config: String,

    /// Check the database and exit
    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match SupportConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    let default_directive: Directive = config
        .service
        .log_level
        .parse()
        .unwrap_or_else(|_| tracing::Level::INFO.into());
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_directive))
        .init();

    let store = match ConversationStore::connect(&config.database).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to open database {}: {}", config.database.path, e);
            std::process::exit(1);
        }
    };

    // Never serve against a half-initialized store
    if let Err(e) = store.initialize().await {
        eprintln!("Failed to initialize database {}: {}", config.database.path, e);
        std::process::exit(1);
    }

    if args.health {
        match store.health_check().await {
            Ok(v) => println!("✅ SQLite connected: {} ({})", v, config.database.path),
            Err(e) => {
                println!("❌ SQLite check failed: {}", e);
                std::process::exit(1);
            }
        }
        let entries = store.knowledge_entries().await?;
        println!("✅ Knowledge base entries: {}", entries.len());
        return Ok(());
    }

    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    let result =
        support_server::http::start_http_server(store.clone(), config, tx.subscribe()).await;
    store.close().await;
    result
}
