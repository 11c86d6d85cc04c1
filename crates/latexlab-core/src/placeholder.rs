//! Argument placeholders
//!
//! Tool arguments and `latex.outDir` may reference the document being built:
//!
//! | placeholder | value for `/ws/paper/main.tex` |
//! |-------------|--------------------------------|
//! | `%DOC%` | `/ws/paper/main` |
//! | `%DOC_EXT%` | `/ws/paper/main.tex` |
//! | `%DOCFILE%` | `main` |
//! | `%DOCFILE_EXT%` | `main.tex` |
//! | `%DIR%` | `/ws/paper` |
//! | `%TMPDIR%` | the session temporary directory |
//! | `%WORKSPACE_FOLDER%` | `/ws` |
//! | `%RELATIVE_DIR%` | `paper` |
//! | `%RELATIVE_DOC%` | `paper/main` |
//! | `%OUTDIR%` | the expanded `latex.outDir` |

use crate::path;

/// Values substituted for one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    doc: String,
    doc_ext: String,
    docfile: String,
    docfile_ext: String,
    dir: String,
    tmp_dir: String,
    workspace: String,
    relative_dir: String,
    relative_doc: String,
}

impl Placeholders {
    /// Placeholders for `doc`; with no document every document placeholder
    /// expands to the empty string
    pub fn new(doc: Option<&str>, tmp_dir: Option<&str>, workspace: Option<&str>) -> Self {
        let tmp_dir = tmp_dir.map(path::normalize).unwrap_or_default();
        let Some(doc) = doc else {
            return Self {
                tmp_dir,
                workspace: workspace.map(path::normalize).unwrap_or_default(),
                ..Self::default()
            };
        };

        let doc_ext = path::normalize(doc);
        let dir = path::parent(&doc_ext);
        let docfile_ext = path::file_name(&doc_ext).to_string();
        let docfile = path::file_stem(&doc_ext).to_string();
        let doc = path::join(&dir, &docfile);
        let workspace = workspace
            .map(path::normalize)
            .unwrap_or_else(|| dir.clone());
        let relative_dir = non_empty_or_dot(path::relative(&workspace, &dir));
        let relative_doc = path::relative(&workspace, &doc);

        Self {
            doc,
            doc_ext,
            docfile,
            docfile_ext,
            dir,
            tmp_dir,
            workspace,
            relative_dir,
            relative_doc,
        }
    }

    /// Directory of the document, or `""` without one
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// Expand every placeholder except `%OUTDIR%`
    pub fn expand(&self, arg: &str) -> String {
        arg.replace("%DOC%", &self.doc)
            .replace("%DOC_EXT%", &self.doc_ext)
            .replace("%DOCFILE_EXT%", &self.docfile_ext)
            .replace("%DOCFILE%", &self.docfile)
            .replace("%DIR%", &self.dir)
            .replace("%TMPDIR%", &self.tmp_dir)
            .replace("%WORKSPACE_FOLDER%", &self.workspace)
            .replace("%RELATIVE_DIR%", &self.relative_dir)
            .replace("%RELATIVE_DOC%", &self.relative_doc)
    }

    /// Expand every placeholder, `%OUTDIR%` becoming `out_dir`
    pub fn expand_with_outdir(&self, arg: &str, out_dir: &str) -> String {
        self.expand(arg).replace("%OUTDIR%", out_dir)
    }
}

fn non_empty_or_dot(value: String) -> String {
    if value.is_empty() {
        ".".to_string()
    } else {
        value
    }
}
