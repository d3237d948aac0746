use crate::dataset::RecipeRecord;
use crate::prompt::format_recipe_for_response;

/// Fixed answer when nothing in the dataset matched. Returned verbatim
/// whatever the user wrote.
pub const NO_MATCH_RESPONSE: &str = "Sorry, no recipes in the dataset match those ingredients. Please try different ingredients.";

/// Deterministic answer built from the ranked matches, used whenever the
/// model backend fails. Never calls the backend and never fails: this is the
/// availability backstop.
pub fn fallback_response(matches: &[RecipeRecord], _user_message: &str) -> String {
    let Some(top) = matches.first() else {
        return NO_MATCH_RESPONSE.to_string();
    };

    let mut out = format!(
        "Based on your ingredients, the best match is {}.\n\n{}",
        top.name,
        format_recipe_for_response(top)
    );

    let also_try: Vec<&str> = matches
        .iter()
        .skip(1)
        .take(2)
        .map(|r| r.name.as_str())
        .collect();
    if !also_try.is_empty() {
        out.push_str(&format!("\n\nYou might also try: {}.", also_try.join(", ")));
    }
    out
}
