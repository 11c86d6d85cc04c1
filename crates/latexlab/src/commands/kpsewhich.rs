use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::{Result, bail};
use serde_json::json;

/// Resolve `name` with kpsewhich
pub fn run(ctx: &Context, name: &str, bib: bool, json: bool) -> Result<()> {
    let resolved = ctx.session.kpsewhich(name, bib);

    if json {
        return print_json(&json!({ "name": name, "bib": bib, "path": resolved }));
    }
    match resolved {
        Some(path) => Ok(print_text(&path)?),
        None => bail!("kpsewhich could not resolve {}", name),
    }
}
