//! support-cli: command-line client for the support desk HTTP API
//!
//! # Subcommands
//! - `status`                               : show server health
//! - `chat <message> [--user <id>]`         : send one message, print the reply
//! - `history <user_id> [-n <limit>] [--json]` : recent exchanges for a user
//! - `smoke [--user <id>]`                  : send the sample support questions

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";
const DEFAULT_USER: &str = "user_001";
const PREVIEW_CHARS: usize = 50;

/// Messages sent by `smoke`, one per classifier topic.
const SAMPLE_MESSAGES: [&str; 4] = [
    "How to reset my password?",
    "I have payment issue",
    "Can't login to my account",
    "Where is my order?",
];

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "support-cli", version, about = "Support desk API client")]
struct Cli {
    /// Support API server URL (overrides SUPPORT_HTTP_URL env var)
    #[arg(long, env = "SUPPORT_HTTP_URL", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show server status
    Status,

    /// Send a message and print the reply
    Chat {
        message: String,

        #[arg(short, long, default_value = DEFAULT_USER)]
        user: String,
    },

    /// Show recent conversations for a user
    History {
        user_id: String,

        /// Maximum number of exchanges to return
        #[arg(short = 'n', long)]
        limit: Option<u32>,

        /// Print the raw JSON array
        #[arg(long)]
        json: bool,
    },

    /// Check the root endpoint and send each sample message
    Smoke {
        #[arg(short, long, default_value = "test_user_001")]
        user: String,
    },
}

// ============================================================================
// API Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ConversationEntry {
    pub user_message: String,
    pub ai_response: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub conversations: Vec<ConversationEntry>,
}

// ============================================================================
// Formatting
// ============================================================================

/// First `max` characters of `text`, with an ellipsis when truncated.
pub fn preview(text: &str, max: usize) -> String {
    let mut out: String = text.chars().take(max).collect();
    if text.chars().count() > max {
        out.push_str("...");
    }
    out
}

pub fn format_entry(entry: &ConversationEntry) -> String {
    format!(
        "[{}]\n  you: {}\n  bot: {}",
        entry.timestamp, entry.user_message, entry.ai_response
    )
}

// ============================================================================
// HTTP Client Calls
// ============================================================================

fn client() -> anyhow::Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?)
}

/// Turn a non-2xx response into an error carrying the body text.
fn check(resp: reqwest::blocking::Response) -> anyhow::Result<reqwest::blocking::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().unwrap_or_default();
    anyhow::bail!("server returned {}: {}", status, body)
}

pub fn send_chat(server: &str, user: &str, message: &str) -> anyhow::Result<ChatResponse> {
    let url = format!("{}/chat", server);
    let body = serde_json::json!({
        "message": message,
        "user_id": user,
    });
    let resp = check(client()?.post(&url).json(&body).send()?)?;
    Ok(resp.json()?)
}

pub fn fetch_history(
    server: &str,
    user_id: &str,
    limit: Option<u32>,
) -> anyhow::Result<HistoryResponse> {
    let mut url = format!("{}/conversations/{}", server, user_id);
    if let Some(n) = limit {
        url.push_str(&format!("?limit={}", n));
    }
    let resp = check(client()?.get(&url).send()?)?;
    Ok(resp.json()?)
}

pub fn fetch_json(server: &str, path: &str) -> anyhow::Result<serde_json::Value> {
    let url = format!("{}{}", server, path);
    let resp = check(client()?.get(&url).send()?)?;
    Ok(resp.json()?)
}

fn do_status(server: &str) -> anyhow::Result<()> {
    let body = fetch_json(server, "/health")?;
    println!("Server:  {}", body["status"].as_str().unwrap_or("unknown"));
    println!("Service: {}", body["service"].as_str().unwrap_or("?"));
    println!("Version: {}", body["version"].as_str().unwrap_or("?"));
    Ok(())
}

fn do_chat(server: &str, user: &str, message: &str) -> anyhow::Result<()> {
    let reply = send_chat(server, user, message)?;
    println!("{}", reply.response);
    Ok(())
}

fn do_history(server: &str, user_id: &str, limit: Option<u32>, json: bool) -> anyhow::Result<()> {
    let history = fetch_history(server, user_id, limit)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&history.conversations)?);
        return Ok(());
    }
    if history.conversations.is_empty() {
        eprintln!("No conversations for: {}", user_id);
        return Ok(());
    }
    for entry in &history.conversations {
        println!("{}\n", format_entry(entry));
    }
    Ok(())
}

/// Returns the number of failed sample messages.
fn do_smoke(server: &str, user: &str) -> anyhow::Result<usize> {
    let root = fetch_json(server, "/")?;
    println!("✅ API reachable: {}", root["message"].as_str().unwrap_or("?"));

    let mut failures = 0;
    for message in SAMPLE_MESSAGES {
        match send_chat(server, user, message) {
            Ok(reply) => println!("✅ '{}': {}", message, preview(&reply.response, PREVIEW_CHARS)),
            Err(e) => {
                failures += 1;
                println!("❌ '{}': {}", message, e);
            }
        }
    }
    Ok(failures)
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let cli = Cli::parse();
    let server = cli.server.trim_end_matches('/').to_string();

    let result = match cli.command {
        Commands::Status => do_status(&server),
        Commands::Chat { message, user } => do_chat(&server, &user, &message),
        Commands::History { user_id, limit, json } => do_history(&server, &user_id, limit, json),
        Commands::Smoke { user } => match do_smoke(&server, &user) {
            Ok(0) => Ok(()),
            Ok(n) => Err(anyhow::anyhow!("{} sample message(s) failed", n)),
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("support-cli: {}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
