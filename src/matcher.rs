use crate::dataset::RecipeRecord;
use std::collections::HashSet;

/// Cap on match results when the caller doesn't specify one.
pub const DEFAULT_MAX_RESULTS: usize = 5;

// Separator substrings rewritten to a space before tokenizing. The word
// separators keep their surrounding spaces so "sandwich" is left alone.
const SEPARATORS: &[&str] = &[",", "/", " and ", " & "];

/// Splits a free-text message into lowercase ingredient tokens.
///
/// This is a lossy heuristic, not an NLP parser: lowercase + trim, rewrite the
/// fixed separator set to spaces, split on whitespace. If that yields nothing
/// but the message wasn't empty, the whole (rewritten) message becomes the
/// single token.
pub fn parse_ingredients(message: &str) -> Vec<String> {
    let mut message = message.trim().to_lowercase();
    for sep in SEPARATORS {
        message = message.replace(sep, " ");
    }
    let tokens: Vec<String> = message
        .split_whitespace()
        .map(|t| t.to_string())
        .collect();
    if !tokens.is_empty() {
        tokens
    } else if !message.is_empty() {
        vec![message]
    } else {
        Vec::new()
    }
}

/// Expands a token into its naive singular/plural variant set, e.g. "egg" ->
/// {"egg", "eggs"} and "eggs" -> {"eggs", "egg"}. Single-character tokens are
/// left alone. Irregular plurals ("tomato"/"tomatoes") are knowingly missed.
pub fn expand_for_match(token: &str) -> HashSet<String> {
    let normalized = token.trim().to_lowercase();
    let mut out = HashSet::new();
    if normalized.chars().count() > 1 {
        match normalized.strip_suffix('s') {
            Some(stem) => {
                out.insert(stem.to_string());
            }
            None => {
                out.insert(format!("{}s", normalized));
            }
        }
    }
    out.insert(normalized);
    out
}

/// Scores one recipe against the user's tokens: overlap is the number of
/// distinct normalized recipe ingredients hit by the expanded token set.
pub fn score_recipe(recipe_ingredients: &[String], user_tokens: &[String]) -> (bool, usize) {
    let recipe_set: HashSet<String> = recipe_ingredients
        .iter()
        .map(|i| i.trim().to_lowercase())
        .collect();
    let mut expanded: HashSet<String> = HashSet::new();
    for token in user_tokens {
        expanded.extend(expand_for_match(token));
    }
    let overlap = recipe_set.intersection(&expanded).count();
    (overlap > 0, overlap)
}

/// Ranks the dataset against the user's tokens: keeps recipes with at least
/// `min_matches` overlapping ingredients, sorted by descending overlap then
/// ascending name, truncated to `max_results`.
///
/// No tokens means no grounded match; an empty slice comes back rather than
/// "everything matched". The whole dataset is rescored on every call, which
/// is fine for a small static collection.
pub fn find_by_ingredients(
    recipes: &[RecipeRecord],
    tokens: &[String],
    max_results: usize,
    min_matches: usize,
) -> Vec<RecipeRecord> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(usize, &RecipeRecord)> = Vec::new();
    for recipe in recipes {
        let (has_match, count) = score_recipe(&recipe.ingredients, tokens);
        if has_match && count >= min_matches {
            scored.push((count, recipe));
        }
    }

    scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.name.cmp(&b.1.name)));
    scored
        .into_iter()
        .take(max_results)
        .map(|(_, recipe)| recipe.clone())
        .collect()
}
