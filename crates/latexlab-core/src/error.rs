use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LatexlabError {
    // Environment errors
    #[error("CONFIGURATION_ERROR: {0}")]
    Configuration(String),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    // File errors
    #[error("FILE_NOT_FOUND: '{path}' does not exist")]
    NotFound { path: PathBuf },

    // Root errors
    #[error("NO_ROOT_DOCUMENT: no root document is set")]
    NoRootDocument,

    // Build errors
    #[error("RECIPE_NOT_FOUND: recipe '{0}' is not defined in latex.recipes")]
    RecipeNotFound(String),

    #[error("TOOL_NOT_FOUND: tool '{0}' is not defined in latex.tools")]
    ToolNotFound(String),

    #[error("TOOL_EXEC_FAILED: {0}")]
    ToolExecFailed(String),

    #[error("BUILD_FAILED: tool '{tool}' exited with code {code}")]
    BuildFailed { tool: String, code: i32 },

    // State errors
    #[error("STATE_READ_ERROR: failed to read state.json: {0}")]
    StateReadError(String),

    #[error("STATE_WRITE_ERROR: failed to write state.json: {0}")]
    StateWriteError(String),

    #[error("STATE_INVALID_SCHEMA: unknown schema version '{0}'")]
    StateInvalidSchema(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl LatexlabError {
    /// Maps an I/O failure on `path` to `NotFound` when the file is missing
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            LatexlabError::NotFound { path: path.into() }
        } else {
            LatexlabError::IoError(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, LatexlabError>;
