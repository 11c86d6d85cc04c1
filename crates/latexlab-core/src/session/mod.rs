//! Per-process context shared by every path resolver
//!
//! A [`Session`] owns the configuration source, the filesystem and process
//! seams, the kpsewhich cache, the build-step memory and the temporary
//! directory. It replaces ambient globals: two sessions never share state.

mod outdir;
mod paths;

use crate::config::{Config, ConfigProvider};
use crate::error::Result;
use crate::fs::{FileSystem, RealFs};
use crate::kpse::Kpsewhich;
use crate::lang;
use crate::memory::BuildMemory;
use crate::path;
use crate::placeholder::Placeholders;
use crate::process::{ProcessRunner, SystemRunner};
use crate::tmp;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// The root document of the current project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootDocument {
    pub path: PathBuf,
    pub lang_id: String,
    pub dir: PathBuf,
}

impl RootDocument {
    /// Root at `path`, classified by extension; unknown extensions count as LaTeX
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lang_id = lang::get_lang_id(&path::to_slash(&path))
            .unwrap_or(lang::LangId::Latex)
            .as_str()
            .to_string();
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self { path, lang_id, dir }
    }
}

/// A `\documentclass[...]{subfiles}` child of the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubFile {
    pub path: PathBuf,
    pub lang_id: String,
}

impl SubFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let RootDocument { path, lang_id, .. } = RootDocument::new(path);
        Self { path, lang_id }
    }
}

pub struct Session {
    config: Arc<dyn ConfigProvider>,
    fs: Arc<dyn FileSystem>,
    runner: Arc<dyn ProcessRunner>,
    kpsewhich: Kpsewhich,
    memory: BuildMemory,
    root: Option<RootDocument>,
    subfile: Option<SubFile>,
    workspace: Option<PathBuf>,
    tmp_dir: Option<TempDir>,
}

impl Session {
    /// Session over the real filesystem and process table, without a
    /// temporary directory
    pub fn new(config: Arc<dyn ConfigProvider>) -> Self {
        let runner: Arc<dyn ProcessRunner> = Arc::new(SystemRunner);
        Self {
            config,
            fs: Arc::new(RealFs),
            kpsewhich: Kpsewhich::new(Arc::clone(&runner)),
            runner,
            memory: BuildMemory::new(),
            root: None,
            subfile: None,
            workspace: None,
            tmp_dir: None,
        }
    }

    /// [`Session::new`] plus a fresh temporary directory
    ///
    /// Fails when the temporary base path is unusable; no session is
    /// produced in that case.
    pub fn open(config: Arc<dyn ConfigProvider>) -> Result<Self> {
        let tmp_dir = tmp::create_tmp_dir()?;
        Ok(Self::new(config).with_tmp_dir(tmp_dir))
    }

    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Replace the process runner; the kpsewhich cache starts over
    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.kpsewhich = Kpsewhich::new(Arc::clone(&runner));
        self.runner = runner;
        self
    }

    pub fn with_tmp_dir(mut self, tmp_dir: TempDir) -> Self {
        self.tmp_dir = Some(tmp_dir);
        self
    }

    pub fn with_workspace(mut self, workspace: impl Into<PathBuf>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    /// Tear down, removing the temporary directory
    pub fn close(self) -> Result<()> {
        if let Some(tmp_dir) = self.tmp_dir {
            let path = tmp_dir.path().to_path_buf();
            tmp_dir.close()?;
            tracing::debug!("Removed temporary directory {}", path.display());
        }
        Ok(())
    }

    /// Current configuration, read fresh from the provider
    pub fn config(&self) -> Config {
        self.config.snapshot()
    }

    pub fn fs(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    pub fn runner(&self) -> &Arc<dyn ProcessRunner> {
        &self.runner
    }

    pub fn memory(&self) -> &BuildMemory {
        &self.memory
    }

    pub fn root(&self) -> Option<&RootDocument> {
        self.root.as_ref()
    }

    pub fn subfile(&self) -> Option<&SubFile> {
        self.subfile.as_ref()
    }

    /// Set the root document
    ///
    /// Switching to a different root drops the build memory of the previous
    /// one along with the sub-file.
    pub fn set_root(&mut self, root: RootDocument) {
        if let Some(previous) = self.root.take() {
            if previous.path != root.path {
                self.memory.clear(&previous.path);
                self.subfile = None;
            }
        }
        tracing::debug!("Root document set to {}", root.path.display());
        self.root = Some(root);
    }

    pub fn clear_root(&mut self) {
        if let Some(previous) = self.root.take() {
            self.memory.clear(&previous.path);
        }
        self.subfile = None;
    }

    pub fn set_subfile(&mut self, subfile: Option<SubFile>) {
        self.subfile = subfile;
    }

    /// The session temporary directory, with forward slashes
    pub fn tmp_dir_path(&self) -> Option<String> {
        self.tmp_dir
            .as_ref()
            .map(|dir| path::to_slash(dir.path()))
    }

    pub fn workspace(&self) -> Option<&Path> {
        self.workspace.as_deref()
    }

    /// Placeholder values for `doc` in this session
    pub fn placeholders(&self, doc: Option<&str>) -> Placeholders {
        let tmp_dir = self.tmp_dir_path();
        let workspace = self.workspace.as_deref().map(path::to_slash);
        Placeholders::new(doc, tmp_dir.as_deref(), workspace.as_deref())
    }

    /// The document a build compiles: the sub-file when
    /// `latex.rootFile.useSubFile` is on and one is set, else the root
    pub fn build_target(&self) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        if self.config().latex.root_file.use_sub_file {
            if let Some(subfile) = &self.subfile {
                return Some(subfile.path.clone());
            }
        }
        Some(root.path.clone())
    }

    /// Document a resolver works on: `tex_path`, else the root
    fn target(&self, tex_path: Option<&Path>) -> Option<PathBuf> {
        tex_path
            .map(Path::to_path_buf)
            .or_else(|| self.root.as_ref().map(|root| root.path.clone()))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("root", &self.root)
            .field("subfile", &self.subfile)
            .field("workspace", &self.workspace)
            .field("tmp_dir", &self.tmp_dir_path())
            .field("kpsewhich", &self.kpsewhich)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SharedConfig;

    fn session() -> Session {
        Session::new(Arc::new(Config::default()))
    }

    #[test]
    fn test_root_document_classification() {
        let root = RootDocument::new("/proj/main.tex");
        assert_eq!(root.lang_id, "latex");
        assert_eq!(root.dir, PathBuf::from("/proj"));

        let weave = RootDocument::new("/proj/report.Rnw");
        assert_eq!(weave.lang_id, "rsweave");
    }

    #[test]
    fn test_set_root_to_new_path_clears_previous_memory() {
        let mut session = session();
        session.set_root(RootDocument::new("/proj/main.tex"));
        session
            .memory()
            .set_tex_dirs(Path::new("/proj/main.tex"), Some("/out"), None);

        session.set_root(RootDocument::new("/proj/another.tex"));

        assert!(session.memory().steps(Path::new("/proj/main.tex")).is_empty());
    }

    #[test]
    fn test_set_same_root_keeps_memory() {
        let mut session = session();
        session.set_root(RootDocument::new("/proj/main.tex"));
        session
            .memory()
            .set_tex_dirs(Path::new("/proj/main.tex"), Some("/out"), None);

        session.set_root(RootDocument::new("/proj/main.tex"));

        assert_eq!(
            session.memory().latest_outdir(Path::new("/proj/main.tex")).as_deref(),
            Some("/out")
        );
    }

    #[test]
    fn test_build_target_honours_use_sub_file() {
        let config = Arc::new(SharedConfig::new(Config::default()));
        let mut session = Session::new(config.clone());
        assert_eq!(session.build_target(), None);

        session.set_root(RootDocument::new("/proj/main.tex"));
        session.set_subfile(Some(SubFile::new("/proj/chapter.tex")));
        assert_eq!(session.build_target(), Some(PathBuf::from("/proj/main.tex")));

        config.update(|c| c.latex.root_file.use_sub_file = true);
        assert_eq!(
            session.build_target(),
            Some(PathBuf::from("/proj/chapter.tex"))
        );
    }

    #[test]
    fn test_close_removes_tmp_dir() {
        let base = TempDir::new().unwrap();
        let tmp_dir = tmp::create_tmp_dir_in(base.path()).unwrap();
        let path = tmp_dir.path().to_path_buf();
        let session = session().with_tmp_dir(tmp_dir);

        assert!(session.tmp_dir_path().is_some());
        session.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_placeholders_use_session_tmp_dir() {
        let base = TempDir::new().unwrap();
        let tmp_dir = tmp::create_tmp_dir_in(base.path()).unwrap();
        let session = session().with_tmp_dir(tmp_dir);

        let expanded = session.placeholders(None).expand("%TMPDIR%");
        assert_eq!(Some(expanded), session.tmp_dir_path());
    }

    #[test]
    fn test_placeholders_use_session_workspace() {
        let session = session().with_workspace("/ws");
        let placeholders = session.placeholders(Some("/ws/paper/main.tex"));

        assert_eq!(placeholders.expand("%WORKSPACE_FOLDER%"), "/ws");
        assert_eq!(placeholders.expand("%RELATIVE_DOC%"), "paper/main");
    }
}
