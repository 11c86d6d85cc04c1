// Core modules
pub mod config;
pub mod error;
pub mod fs;
pub mod kpse;
pub mod lang;
pub mod lock;
pub mod memory;
pub mod path;
pub mod placeholder;
pub mod process;
pub mod session;
pub mod state;
pub mod tmp;

// Re-export commonly used types
pub use config::{Config, ConfigProvider, FileConfig, SharedConfig};
pub use error::{LatexlabError, Result};
pub use memory::{BuildMemory, BuildStep};
pub use session::{RootDocument, Session, SubFile};
