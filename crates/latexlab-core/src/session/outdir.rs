use super::Session;
use crate::config::DIR_PLACEHOLDER;
use crate::path;
use std::path::Path;

/// Value returned when no output directory can be determined
pub const CURRENT_DIR: &str = "./";

impl Session {
    /// Output directory for `tex_path`, or for the root when `None`
    ///
    /// `latex.outDir` is expanded against the document. When resolving for the
    /// root (`None`) while `latex.outDir` is left at `%DIR%` (or empty), the
    /// output directory of the latest build takes precedence. An explicit
    /// document never consults the build memory. A relative result stays
    /// relative to the document's directory; an empty one becomes `./`.
    /// Trailing slashes are removed.
    pub fn out_dir(&self, tex_path: Option<&Path>) -> String {
        let config = self.config();
        let configured = config.latex.out_dir.trim();

        if (configured == DIR_PLACEHOLDER || configured.is_empty()) && tex_path.is_none() {
            if let Some(outdir) = self.remembered_outdir() {
                tracing::debug!("Using output directory {} from the last build", outdir);
                return finish(&outdir);
            }
        }

        let doc = self.target(tex_path).map(|doc| path::to_slash(&doc));
        let expanded = self.placeholders(doc.as_deref()).expand(configured);
        finish(&expanded)
    }

    fn remembered_outdir(&self) -> Option<String> {
        let doc = self.build_target()?;
        self.memory
            .latest_outdir(&doc)
            .filter(|outdir| !outdir.trim().is_empty())
    }
}

fn finish(out_dir: &str) -> String {
    if out_dir.trim().is_empty() {
        return CURRENT_DIR.to_string();
    }
    match path::normalize(out_dir).as_str() {
        "." => CURRENT_DIR.to_string(),
        normalized => normalized.to_string(),
    }
}
