//! Path resolver commands - outdir, pdf, fls, jobname, bib

use crate::context::{Context, absolutize};
use crate::output::{print_json, print_text};
use anyhow::{Result, bail};
use serde_json::json;
use std::path::{Path, PathBuf};

pub fn outdir(ctx: &Context, tex: Option<PathBuf>, json: bool) -> Result<()> {
    let tex = tex.as_deref().map(absolutize).transpose()?;
    let out_dir = ctx.session.out_dir(tex.as_deref());

    if json {
        print_json(&json!({ "document": document(ctx, tex.as_deref()), "out_dir": out_dir }))
    } else {
        Ok(print_text(&out_dir)?)
    }
}

pub fn pdf(ctx: &Context, tex: &Path, json: bool) -> Result<()> {
    let tex = absolutize(tex)?;
    let pdf = ctx.session.pdf_path(&tex);

    if json {
        print_json(&json!({ "document": tex, "pdf": pdf }))
    } else {
        Ok(print_text(&pdf)?)
    }
}

pub fn fls(ctx: &Context, tex: &Path, json: bool) -> Result<()> {
    let tex = absolutize(tex)?;
    let fls = ctx.session.fls_path(&tex);

    if json {
        return print_json(&json!({ "document": tex, "fls": fls }));
    }
    match fls {
        Some(fls) => Ok(print_text(&fls)?),
        None => bail!("No .fls file found for {}", tex.display()),
    }
}

pub fn jobname(ctx: &Context, tex: &Path, json: bool) -> Result<()> {
    let jobname = ctx.session.jobname(tex);

    if json {
        print_json(&json!({ "document": tex, "jobname": jobname }))
    } else {
        Ok(print_text(&jobname)?)
    }
}

pub fn bib(ctx: &Context, name: &str, base_dir: Option<PathBuf>, json: bool) -> Result<()> {
    let base_dir = match base_dir {
        Some(dir) => absolutize(&dir)?,
        None => std::env::current_dir()?,
    };
    let found = ctx.session.bib_path(name, &base_dir);
    tracing::debug!("Searched for {} from {}", name, base_dir.display());

    if json {
        return print_json(&json!({ "name": name, "base_dir": base_dir, "paths": found }));
    }
    if found.is_empty() {
        bail!("Cannot find .bib file {}", name);
    }
    for path in found {
        print_text(&path)?;
    }
    Ok(())
}

fn document(ctx: &Context, tex: Option<&Path>) -> Option<PathBuf> {
    tex.map(Path::to_path_buf)
        .or_else(|| ctx.session.root().map(|root| root.path.clone()))
}
