use recipe_chat::api_connection::connection::OllamaBackend;
use recipe_chat::dataset::{RecipeRecord, RecipeStore};
use recipe_chat::engine::RecipeEngine;
use recipe_chat::fallback::NO_MATCH_RESPONSE;
use std::env;
use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

const LIVE_OLLAMA_URL_ENV_VAR: &str = "OLLAMA_URL";

fn omelette_store() -> Arc<RecipeStore> {
    Arc::new(RecipeStore::from_records(vec![RecipeRecord {
        name: "Omelette".to_string(),
        ingredients: vec!["egg".to_string(), "onion".to_string()],
        instructions: "Beat and fry.".to_string(),
    }]))
}

// Nothing listens on port 1, so every chat attempt fails fast and the engine
// must take the fallback path.
fn unreachable_backend() -> OllamaBackend {
    OllamaBackend::new(
        "http://127.0.0.1:1",
        "llama3.2:1b",
        Duration::from_millis(250),
    )
}

#[tokio::test]
async fn test_suggest_falls_back_to_matched_recipe_when_backend_down() {
    let engine = RecipeEngine::new(omelette_store(), unreachable_backend());
    let answer = engine.suggest("I have eggs and onions").await;
    assert!(answer.contains("Omelette"), "answer was: {}", answer);
    assert!(answer.contains("Beat and fry."), "answer was: {}", answer);
}

#[tokio::test]
async fn test_suggest_no_match_returns_fixed_polite_answer() {
    let engine = RecipeEngine::new(omelette_store(), unreachable_backend());
    let answer = engine.suggest("chicken").await;
    assert_eq!(answer, NO_MATCH_RESPONSE);
}

#[tokio::test]
async fn test_suggest_empty_message_returns_fixed_polite_answer() {
    let engine = RecipeEngine::new(omelette_store(), unreachable_backend());
    let answer = engine.suggest("   ").await;
    assert_eq!(answer, NO_MATCH_RESPONSE);
}

#[tokio::test]
async fn test_suggest_fallback_suggests_two_further_matches() {
    let store = Arc::new(RecipeStore::from_records(vec![
        RecipeRecord {
            name: "Omelette".to_string(),
            ingredients: vec!["egg".to_string(), "onion".to_string()],
            instructions: "Beat and fry.".to_string(),
        },
        RecipeRecord {
            name: "Fried Rice".to_string(),
            ingredients: vec!["rice".to_string(), "egg".to_string(), "onion".to_string()],
            instructions: "Toss on high heat.".to_string(),
        },
        RecipeRecord {
            name: "Pancakes".to_string(),
            ingredients: vec!["flour".to_string(), "egg".to_string()],
            instructions: "Fry until golden.".to_string(),
        },
        RecipeRecord {
            name: "Custard".to_string(),
            ingredients: vec!["egg".to_string(), "milk".to_string()],
            instructions: "Whisk over low heat.".to_string(),
        },
    ]));
    let engine = RecipeEngine::new(store, unreachable_backend());

    let answer = engine.suggest("eggs and onions").await;
    // Fried Rice and Omelette both overlap on egg+onion; name breaks the tie.
    assert!(answer.contains("Recipe: Fried Rice"), "answer was: {}", answer);
    assert!(answer.contains("You might also try: Omelette, Custard."), "answer was: {}", answer);
}

#[tokio::test]
async fn test_engine_from_dataset_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"name": "Omelette", "ingredients": ["egg", "onion"], "instructions": "Beat and fry."}}]"#
    )
    .unwrap();
    file.flush().unwrap();

    let store = RecipeStore::load(file.path()).unwrap();
    let engine = RecipeEngine::new(Arc::new(store), unreachable_backend());
    let answer = engine.suggest("Egg, Onion").await;
    assert!(answer.contains("Omelette"));
}

#[tokio::test]
async fn test_bundled_dataset_loads() {
    let store = RecipeStore::load(Path::new(env!("CARGO_MANIFEST_DIR")).join("recipes.json").as_path())
        .unwrap();
    assert!(!store.is_empty());
    for recipe in store.get_all() {
        assert!(!recipe.name.is_empty());
        assert!(!recipe.ingredients.is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn test_suggest_against_live_ollama() {
    // Requires a running Ollama with the default model pulled.
    let url = match env::var(LIVE_OLLAMA_URL_ENV_VAR) {
        Ok(url) => url,
        Err(_) => {
            println!(
                "Skipping test_suggest_against_live_ollama: {} not set.",
                LIVE_OLLAMA_URL_ENV_VAR
            );
            return;
        }
    };
    let backend = OllamaBackend::new(url, "llama3.2:1b", Duration::from_secs(60));
    let engine = RecipeEngine::new(omelette_store(), backend);
    let answer = engine.suggest("I have eggs and onions").await;
    assert!(!answer.is_empty());
}
