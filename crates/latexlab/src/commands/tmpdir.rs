use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::{Result, anyhow};
use serde_json::json;

/// Show the session temporary directory
///
/// The directory is removed again when the command exits.
pub fn run(ctx: &Context, json: bool) -> Result<()> {
    let tmp_dir = ctx
        .session
        .tmp_dir_path()
        .ok_or_else(|| anyhow!("No temporary directory was created"))?;

    if json {
        print_json(&json!({ "tmp_dir": tmp_dir }))
    } else {
        Ok(print_text(&tmp_dir)?)
    }
}
