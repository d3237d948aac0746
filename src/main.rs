use anyhow::{Context, Result};
use recipe_chat::api_connection::connection::OllamaBackend;
use recipe_chat::cli::{self, Command};
use recipe_chat::dataset::RecipeStore;
use recipe_chat::engine::RecipeEngine;
use recipe_chat::server;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok(); // Load .env for OLLAMA_MODEL etc.

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipe_chat=info".into()),
        )
        .init();

    let cli_args = cli::parse_args();

    // The dataset is loaded exactly once, before anything is served; a broken
    // dataset means the process refuses to start.
    let store = RecipeStore::load(Path::new(&cli_args.recipes))
        .with_context(|| format!("Failed to load recipe dataset from '{}'", cli_args.recipes))?;
    tracing::info!(recipes = store.len(), path = %cli_args.recipes, "recipe dataset loaded");

    let backend = OllamaBackend::new(
        cli::resolve_ollama_url(&cli_args),
        cli::resolve_model(&cli_args),
        Duration::from_secs(cli_args.timeout),
    );
    let engine = Arc::new(RecipeEngine::new(Arc::new(store), backend));

    match cli_args.command {
        Command::Chat => chat_loop(engine).await,
        Command::Serve { ref addr } => {
            let addr = cli::resolve_api_address(addr.as_deref());
            server::serve(engine, &addr).await
        }
    }
}

async fn chat_loop(engine: Arc<RecipeEngine>) -> Result<()> {
    println!("Recipe Chatbot (model: {})", engine.model());
    println!("Enter ingredients or a recipe question (e.g. 'Egg, Onion'). Type 'quit' or 'exit' to stop.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        std::io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("Failed to read stdin")? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }

        let answer = engine.suggest(input).await;
        println!("Bot: {}\n", answer);
    }

    println!("Goodbye.");
    Ok(())
}
