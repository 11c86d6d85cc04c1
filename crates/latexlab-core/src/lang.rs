//! File extension and language identifier classification
//!
//! All extension checks are case-insensitive (`.Rnw`, `.TeX`) and compare the
//! whole extension, never a substring.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Document kinds recognized from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LangId {
    Latex,
    Pweave,
    Jlweave,
    Rsweave,
    Doctex,
}

impl LangId {
    pub fn as_str(&self) -> &'static str {
        match self {
            LangId::Latex => "latex",
            LangId::Pweave => "pweave",
            LangId::Jlweave => "jlweave",
            LangId::Rsweave => "rsweave",
            LangId::Doctex => "doctex",
        }
    }
}

impl fmt::Display for LangId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PWEAVE_EXT: &[&str] = &[".pnw", ".ptexw"];
const JLWEAVE_EXT: &[&str] = &[".jnw", ".jtexw"];
const RSWEAVE_EXT: &[&str] = &[".rnw", ".rtex", ".snw"];

/// Sources that are never treated as binary even though they are not
/// compiled directly
const TEX_SOURCE_EXT: &[&str] = &[
    ".tex", ".bib", ".cls", ".sty", ".bst", ".bbx", ".cbx", ".def", ".cfg", ".dtx", ".ins",
];

const TEX_LANG_IDS: &[&str] = &[
    "tex",
    "latex",
    "latex-expl3",
    "doctex",
    "pweave",
    "jlweave",
    "rsweave",
];
const BIB_LANG_IDS: &[&str] = &["bibtex"];
const DTX_LANG_IDS: &[&str] = &["doctex"];

fn contains_ext(set: &[&str], ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    set.iter().any(|candidate| *candidate == ext)
}

/// Language of a file path or name, by extension
///
/// ```rust
/// use latexlab_core::lang::{get_lang_id, LangId};
///
/// assert_eq!(get_lang_id("folder/example.TeX"), Some(LangId::Latex));
/// assert_eq!(get_lang_id("example.Rnw"), Some(LangId::Rsweave));
/// assert_eq!(get_lang_id("example.unknown"), None);
/// ```
pub fn get_lang_id(file: &str) -> Option<LangId> {
    let ext = crate::path::extension(file).to_ascii_lowercase();
    match ext.as_str() {
        ".tex" => Some(LangId::Latex),
        ".dtx" => Some(LangId::Doctex),
        e if contains_ext(PWEAVE_EXT, e) => Some(LangId::Pweave),
        e if contains_ext(JLWEAVE_EXT, e) => Some(LangId::Jlweave),
        e if contains_ext(RSWEAVE_EXT, e) => Some(LangId::Rsweave),
        _ => None,
    }
}

/// `.tex` or one of the weave dialects
pub fn has_tex_ext(ext: &str) -> bool {
    contains_ext(&[".tex"], ext)
        || contains_ext(PWEAVE_EXT, ext)
        || contains_ext(JLWEAVE_EXT, ext)
        || contains_ext(RSWEAVE_EXT, ext)
}

/// Anything that is not a TeX-family source file
pub fn has_binary_ext(ext: &str) -> bool {
    !(has_tex_ext(ext) || contains_ext(TEX_SOURCE_EXT, ext))
}

pub fn has_tex_lang_id(lang_id: &str) -> bool {
    TEX_LANG_IDS.contains(&lang_id)
}

pub fn has_bib_lang_id(lang_id: &str) -> bool {
    BIB_LANG_IDS.contains(&lang_id)
}

pub fn has_dtx_lang_id(lang_id: &str) -> bool {
    DTX_LANG_IDS.contains(&lang_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_id_latex() {
        assert_eq!(get_lang_id("example.tex"), Some(LangId::Latex));
    }

    #[test]
    fn test_lang_id_weave_dialects() {
        assert_eq!(get_lang_id("example.pnw"), Some(LangId::Pweave));
        assert_eq!(get_lang_id("example.ptexw"), Some(LangId::Pweave));
        assert_eq!(get_lang_id("example.jnw"), Some(LangId::Jlweave));
        assert_eq!(get_lang_id("example.jtexw"), Some(LangId::Jlweave));
        for name in [
            "example.rnw",
            "example.Rnw",
            "example.rtex",
            "example.Rtex",
            "example.snw",
            "example.Snw",
        ] {
            assert_eq!(get_lang_id(name), Some(LangId::Rsweave), "{}", name);
        }
    }

    #[test]
    fn test_lang_id_doctex() {
        assert_eq!(get_lang_id("example.dtx"), Some(LangId::Doctex));
    }

    #[test]
    fn test_lang_id_unknown() {
        assert_eq!(get_lang_id("example.unknown"), None);
        assert_eq!(get_lang_id("example"), None);
        // whole-extension match, not substring
        assert_eq!(get_lang_id("example.texx"), None);
    }

    #[test]
    fn test_lang_id_mixed_case_and_folders() {
        assert_eq!(get_lang_id("example.TeX"), Some(LangId::Latex));
        assert_eq!(get_lang_id("folder/example.tex"), Some(LangId::Latex));
    }

    #[test]
    fn test_has_tex_ext() {
        for ext in [".tex", ".rnw", ".jnw", ".pnw", ".Rnw"] {
            assert!(has_tex_ext(ext), "{}", ext);
        }
        for ext in [".cls", ".sty", ".txt"] {
            assert!(!has_tex_ext(ext), "{}", ext);
        }
    }

    #[test]
    fn test_has_binary_ext() {
        for ext in [".pdf", ".png", ".txt"] {
            assert!(has_binary_ext(ext), "{}", ext);
        }
        for ext in [".tex", ".cls", ".rnw", ".jnw", ".pnw", ".bib", ".sty"] {
            assert!(!has_binary_ext(ext), "{}", ext);
        }
    }

    #[test]
    fn test_lang_id_predicates() {
        for id in [
            "tex",
            "latex",
            "latex-expl3",
            "doctex",
            "pweave",
            "jlweave",
            "rsweave",
        ] {
            assert!(has_tex_lang_id(id), "{}", id);
        }
        for id in ["markdown", "python", "html"] {
            assert!(!has_tex_lang_id(id), "{}", id);
        }

        assert!(has_bib_lang_id("bibtex"));
        assert!(!has_bib_lang_id("latex"));
        assert!(!has_bib_lang_id("tex"));

        assert!(has_dtx_lang_id("doctex"));
        assert!(!has_dtx_lang_id("latex"));
        assert!(!has_dtx_lang_id("markdown"));
    }

    #[test]
    fn test_lang_id_display() {
        assert_eq!(LangId::Rsweave.to_string(), "rsweave");
    }
}
