use crate::output::{print_json, print_text};
use anyhow::Result;
use latexlab_core::{lang, path};
use serde_json::json;

/// Classify `file` by its extension
pub fn run(file: &str, json: bool) -> Result<()> {
    let ext = path::extension(file);
    let lang_id = lang::get_lang_id(file);

    if json {
        return print_json(&json!({
            "file": file,
            "extension": ext,
            "lang_id": lang_id,
            "tex": lang::has_tex_ext(ext),
            "binary": lang::has_binary_ext(ext),
        }));
    }

    let label = lang_id.map_or("unknown", |id| id.as_str());
    print_text(label)?;
    Ok(())
}
