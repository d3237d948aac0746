use clap::{Parser, Subcommand};
use std::env;

use crate::api_connection::endpoints::OLLAMA_DEFAULT_URL;

/// Model used when neither --model nor OLLAMA_MODEL is set.
pub const DEFAULT_MODEL: &str = "llama3.2:1b";

/// Address used when neither --addr nor API_ADDRESS is set.
pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8000";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the recipe dataset JSON file
    #[arg(long, default_value = "recipes.json")]
    pub recipes: String,

    /// Ollama model to use (falls back to $OLLAMA_MODEL, then llama3.2:1b)
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the Ollama API (falls back to $OLLAMA_URL, then http://127.0.0.1:11434)
    #[arg(long)]
    pub ollama_url: Option<String>,

    /// Timeout for model backend calls, in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat loop on stdin/stdout
    Chat,
    /// Serve the HTTP API (GET /health, POST /chat)
    Serve {
        /// Listen address (falls back to $API_ADDRESS, then 127.0.0.1:8000)
        #[arg(long)]
        addr: Option<String>,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn resolve_model(cli: &Cli) -> String {
    cli.model
        .clone()
        .unwrap_or_else(|| env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()))
}

pub fn resolve_ollama_url(cli: &Cli) -> String {
    cli.ollama_url.clone().unwrap_or_else(|| {
        env::var("OLLAMA_URL").unwrap_or_else(|_| OLLAMA_DEFAULT_URL.to_string())
    })
}

pub fn resolve_api_address(addr: Option<&str>) -> String {
    match addr {
        Some(addr) => addr.to_string(),
        None => env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_API_ADDRESS.to_string()),
    }
}
