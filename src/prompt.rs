use crate::dataset::RecipeRecord;

/// Fixed grounding instructions sent as the system message on every request.
pub const SYSTEM_PROMPT: &str = "You are a helpful recipe assistant. You suggest recipes ONLY from the provided recipe list. Do not invent or hallucinate recipes. If the user's ingredients match one or more recipes below, recommend the best match(es) and briefly explain why. If no recipe matches well, say so politely and suggest they try different ingredients from the list. Keep responses concise and structured.";

/// Most dataset records shown when nothing matched and we fall back to a
/// "for reference" sample.
pub const SAMPLE_LIMIT: usize = 15;

/// The three textual modes of the user prompt, as a closed set so the
/// renderer is a total match rather than nested conditionals.
#[derive(Debug)]
pub enum PromptContext<'a> {
    /// One or more matched recipes; the model must use only these.
    Grounded(&'a [RecipeRecord]),
    /// No match, but a bounded sample of the dataset is shown for reference.
    SampledUngrounded(&'a [RecipeRecord]),
    /// No match and no sample to show.
    EmptyUngrounded,
}

impl<'a> PromptContext<'a> {
    pub fn new(matches: &'a [RecipeRecord], sample: Option<&'a [RecipeRecord]>) -> Self {
        if !matches.is_empty() {
            PromptContext::Grounded(matches)
        } else {
            match sample {
                Some(recipes) if !recipes.is_empty() => PromptContext::SampledUngrounded(recipes),
                _ => PromptContext::EmptyUngrounded,
            }
        }
    }

    fn render(&self) -> String {
        match self {
            PromptContext::Grounded(matches) => {
                let recipe_text = matches
                    .iter()
                    .map(format_recipe_for_prompt)
                    .collect::<Vec<_>>()
                    .join("\n\n");
                format!(
                    "Here are the recipes that match the user's ingredients (use ONLY these):\n\n{}",
                    recipe_text
                )
            }
            PromptContext::SampledUngrounded(recipes) => {
                let recipe_text = recipes
                    .iter()
                    .take(SAMPLE_LIMIT)
                    .map(format_recipe_for_prompt)
                    .collect::<Vec<_>>()
                    .join("\n\n");
                format!(
                    "No recipes matched the user's ingredients exactly. Here is a subset of available recipes for reference:\n\n{}",
                    recipe_text
                )
            }
            PromptContext::EmptyUngrounded => {
                "No recipes in the dataset match the user's ingredients. Politely tell the user and suggest they try different ingredients.".to_string()
            }
        }
    }
}

/// Bullet-block rendering used inside the model prompt.
pub fn format_recipe_for_prompt(recipe: &RecipeRecord) -> String {
    format!(
        "- **{}**\n  Ingredients: {}\n  Instructions: {}",
        recipe.name,
        recipe.ingredients.join(", "),
        recipe.instructions
    )
}

/// Plain-text rendering with the same field order, shared with the fallback
/// answer so both paths show a recipe identically.
pub fn format_recipe_for_response(recipe: &RecipeRecord) -> String {
    format!(
        "Recipe: {}\nIngredients: {}\nInstructions: {}",
        recipe.name,
        recipe.ingredients.join(", "),
        recipe.instructions
    )
}

/// Builds the (system, user) prompt pair. Pure string assembly: same inputs
/// always produce the same two strings.
pub fn build_prompt(
    user_message: &str,
    matches: &[RecipeRecord],
    sample: Option<&[RecipeRecord]>,
) -> (String, String) {
    let context = PromptContext::new(matches, sample).render();
    let user_prompt = format!(
        "{}\n\n---\n\nUser message: {}\n\nRespond with a helpful recipe suggestion based only on the recipes above.",
        context, user_message
    );
    (SYSTEM_PROMPT.to_string(), user_prompt)
}
