//! Global context for CLI commands

use crate::cli::Cli;
use anyhow::{Context as _, Result};
use latexlab_core::config::{ConfigProvider, FileConfig};
use latexlab_core::state::State;
use latexlab_core::{Config, RootDocument, Session, SubFile, path};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default configuration file, looked up in the current directory
pub const CONFIG_FILE: &str = "latexlab.toml";

/// Session, state and flags shared by every command
pub struct Context {
    pub session: Session,
    pub state: State,
    state_path: Option<PathBuf>,
    pub verbose: bool,
}

impl Context {
    /// Open a session for the global flags of `cli`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicitly given config file does not exist or cannot be parsed
    /// - The temporary directory cannot be created
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = load_config(cli.config.as_deref())?;
        let mut session = Session::open(config)?.with_workspace(env::current_dir()?);

        let mut state_path = None;
        let mut state = State::empty();
        if let Some(root) = &cli.root {
            let root = RootDocument::new(absolutize(root)?);
            let path = State::path_for(&root.dir);
            state = State::load_or_empty(&path);
            session.set_root(root);
            state.restore_memory(session.memory());
            state_path = Some(path);
        }
        if let Some(subfile) = &cli.subfile {
            session.set_subfile(Some(SubFile::new(absolutize(subfile)?)));
        }

        Ok(Self {
            session,
            state,
            state_path,
            verbose: cli.verbose,
        })
    }

    /// Persist the build memory and state; a no-op without a root
    pub fn save_state(&mut self) -> Result<()> {
        let Some(path) = &self.state_path else {
            return Ok(());
        };
        self.state.capture_memory(self.session.memory());
        self.state.save(path)?;
        tracing::debug!("Saved {}", path.display());
        Ok(())
    }

    /// Tear the session down, removing its temporary directory
    pub fn close(self) -> Result<()> {
        self.session.close()?;
        Ok(())
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Arc<dyn ConfigProvider>> {
    match explicit {
        Some(path) => {
            // Fail early on a broken explicit config; later snapshots re-read it.
            Config::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            Ok(Arc::new(FileConfig::new(absolutize(path)?)))
        }
        None => {
            let default = env::current_dir()?.join(CONFIG_FILE);
            Ok(Arc::new(FileConfig::new(default)))
        }
    }
}

/// Make `file` absolute against the current directory, lexically
pub fn absolutize(file: &Path) -> Result<PathBuf> {
    let joined = if file.is_absolute() {
        file.to_path_buf()
    } else {
        env::current_dir()?.join(file)
    };
    Ok(PathBuf::from(path::normalize(&path::to_slash(&joined))))
}
