use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder substituted with the document's directory
pub const DIR_PLACEHOLDER: &str = "%DIR%";

/// latexlab.toml schema
///
/// Section and key names mirror the `latex-workshop` settings they stand in
/// for (`latex.outDir`, `kpsewhich.bibtex.enabled`, ...). Every key is
/// optional; a missing file is the same as an empty one.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub latex: LatexConfig,
    pub kpsewhich: KpsewhichConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LatexConfig {
    /// Output directory, may contain argument placeholders
    #[serde(rename = "outDir")]
    pub out_dir: String,
    /// Overrides the job name (file stem) when non-empty
    pub jobname: String,
    /// Extra absolute directories searched for `.bib` files
    #[serde(rename = "bibDirs")]
    pub bib_dirs: Vec<String>,
    pub tools: Vec<Tool>,
    pub recipes: Vec<Recipe>,
    pub recipe: RecipeConfig,
    #[serde(rename = "rootFile")]
    pub root_file: RootFileConfig,
}

impl Default for LatexConfig {
    fn default() -> Self {
        Self {
            out_dir: DIR_PLACEHOLDER.to_string(),
            jobname: String::new(),
            bib_dirs: Vec::new(),
            tools: default_tools(),
            recipes: default_recipes(),
            recipe: RecipeConfig::default(),
            root_file: RootFileConfig::default(),
        }
    }
}

/// One external command of a recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Ordered list of tool names run for one build
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub name: String,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecipeConfig {
    /// `"first"` or the name of a recipe
    pub default: String,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            default: "first".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RootFileConfig {
    /// Build the sub-file instead of the root when one is set
    #[serde(rename = "useSubFile")]
    pub use_sub_file: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KpsewhichConfig {
    pub path: String,
    pub bibtex: KpsewhichBibtexConfig,
}

impl Default for KpsewhichConfig {
    fn default() -> Self {
        Self {
            path: "kpsewhich".to_string(),
            bibtex: KpsewhichBibtexConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct KpsewhichBibtexConfig {
    pub enabled: bool,
}

fn default_tools() -> Vec<Tool> {
    vec![Tool {
        name: "latexmk".to_string(),
        command: "latexmk".to_string(),
        args: [
            "-synctex=1",
            "-interaction=nonstopmode",
            "-file-line-error",
            "-pdf",
            "-outdir=%OUTDIR%",
            "%DOC%",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        env: BTreeMap::new(),
    }]
}

fn default_recipes() -> Vec<Recipe> {
    vec![Recipe {
        name: "latexmk 🔃".to_string(),
        tools: vec!["latexmk".to_string()],
    }]
}

impl Config {
    /// Parse a latexlab.toml document
    pub fn from_toml_str(content: &str) -> crate::error::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::error::LatexlabError::ConfigParseError(e.to_string()))
    }

    /// latexlab.toml を読み込む
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| crate::error::LatexlabError::ConfigParseError(e.to_string()))?;

        Self::from_toml_str(&content)
    }

    /// Look up a tool by name
    pub fn tool(&self, name: &str) -> Option<&Tool> {
        self.latex.tools.iter().find(|tool| tool.name == name)
    }
}
