use latexlab_core::config::{Config, Recipe, Tool};
use latexlab_core::{LatexlabError, Result};

/// Value of `latex.recipe.default` selecting the first recipe
pub const FIRST_RECIPE: &str = "first";

/// Pick the recipe to run
///
/// An explicit `name` wins; otherwise `latex.recipe.default` decides, where
/// `"first"` means the first configured recipe.
pub fn select_recipe<'a>(config: &'a Config, name: Option<&str>) -> Result<&'a Recipe> {
    let wanted = name.unwrap_or(config.latex.recipe.default.as_str());

    if name.is_none() && wanted == FIRST_RECIPE {
        return config
            .latex
            .recipes
            .first()
            .ok_or_else(|| LatexlabError::RecipeNotFound(FIRST_RECIPE.to_string()));
    }

    config
        .latex
        .recipes
        .iter()
        .find(|recipe| recipe.name == wanted)
        .ok_or_else(|| LatexlabError::RecipeNotFound(wanted.to_string()))
}

/// Tools of `recipe`, in order
pub fn recipe_tools<'a>(config: &'a Config, recipe: &Recipe) -> Result<Vec<&'a Tool>> {
    recipe
        .tools
        .iter()
        .map(|name| {
            config
                .tool(name)
                .ok_or_else(|| LatexlabError::ToolNotFound(name.clone()))
        })
        .collect()
}
