//! A small LaTeX project used across the test suites
//!
//! ```text
//! main.tex            main.fls        main.bib       another.bib
//! another.tex         document with spaces.tex
//! subdir/sub.bib      output/main.fls auxfiles/another.fls
//! auxfiles/main.fls
//! ```

use crate::mock::MemoryFs;
use std::path::Path;
use tempfile::TempDir;

pub const MAIN_TEX: &str = "\\documentclass{article}\n\\begin{document}\nabc\n\\end{document}\n";

/// Relative path and content of every fixture file, in creation order
pub const FIXTURE_FILES: &[(&str, &str)] = &[
    ("main.tex", MAIN_TEX),
    ("main.fls", "PWD /fixture\nINPUT main.tex\nOUTPUT main.aux\n"),
    ("another.tex", MAIN_TEX),
    ("main.bib", "@article{main, title={Main}}\n"),
    ("another.bib", "@article{another, title={Another}}\n"),
    ("subdir/sub.bib", "@article{sub, title={Sub}}\n"),
    ("output/main.fls", "INPUT main.tex\n"),
    ("auxfiles/another.fls", "INPUT another.tex\n"),
    ("document with spaces.tex", MAIN_TEX),
    ("auxfiles/main.fls", "INPUT main.tex\n"),
];

/// Write the fixture project to a fresh directory under `.tmp/`
pub fn fixture_project() -> TempDir {
    let temp = crate::temp_dir_in_workspace();
    for (rel, content) in FIXTURE_FILES {
        let path = temp.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        std::fs::write(&path, content).expect("Failed to write fixture file");
    }
    temp
}

/// The fixture project held in memory under `root`
pub fn fixture_memory_fs(root: &Path) -> MemoryFs {
    let fs = MemoryFs::new();
    for (rel, content) in FIXTURE_FILES {
        fs.add_file(root.join(rel), *content);
    }
    fs
}
