//! Recipe-driven LaTeX builds for latexlab.
//!
//! A build compiles the root document (or its sub-file) by running the tools
//! of one recipe in order:
//!
//! ```text
//! build()
//!     ↓
//! 1. Pick the target document (sub-file under useSubFile, else root)
//!     ↓
//! 2. Select the recipe (explicit name, latex.recipe.default, or first)
//!     ↓
//! 3. For each tool: expand placeholders, resolve the binary, run it
//!    in the document directory; stop at the first failure
//!     ↓
//! 4. Record the directories each tool wrote to in the build memory
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use latexlab_build::{BuildOptions, build};
//! use latexlab_core::{Config, RootDocument, Session};
//! use std::sync::Arc;
//!
//! # fn main() -> latexlab_core::Result<()> {
//! let mut session = Session::open(Arc::new(Config::default()))?;
//! session.set_root(RootDocument::new("/path/to/main.tex"));
//!
//! let report = build(&session, &BuildOptions::default())?.check()?;
//! println!("PDF at {}", report.pdf);
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod build;
pub mod exec;
pub mod recipe;

pub use build::{BuildOptions, BuildReport, StepReport, build};
pub use exec::{ExecResult, PreparedTool, exec_tool, prepare_tool};
pub use recipe::{select_recipe, recipe_tools};

// Type alias for convenience
pub type Result<T> = latexlab_core::Result<T>;
