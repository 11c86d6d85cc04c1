use super::Session;
use crate::error::{LatexlabError, Result};
use crate::path;
use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;

const BIB_EXT: &str = ".bib";

impl Session {
    /// Job name of `tex_path`: `latex.jobname` when set, else the file stem
    pub fn jobname(&self, tex_path: &Path) -> String {
        let configured = self.config().latex.jobname;
        let configured = configured.trim();
        if configured.is_empty() {
            path::file_stem(&path::to_slash(tex_path)).to_string()
        } else {
            configured.to_string()
        }
    }

    /// Where the PDF of `tex_path` ends up
    ///
    /// The path is computed, never probed, so the PDF need not exist.
    pub fn pdf_path(&self, tex_path: &Path) -> String {
        let out_dir = self.resolved_out_dir(tex_path);
        path::join(&out_dir, &format!("{}.pdf", self.jobname(tex_path)))
    }

    /// The `.fls` recorder file of `tex_path`, if one exists
    ///
    /// Looks in the output directory first, then in the auxiliary directory
    /// recorded for the document, or failing that for the build target.
    pub fn fls_path(&self, tex_path: &Path) -> Option<String> {
        let file_name = format!("{}.fls", self.jobname(tex_path));

        let candidate = path::join(&self.resolved_out_dir(tex_path), &file_name);
        if self.fs.exists(Path::new(&candidate)) {
            return Some(candidate);
        }

        let auxdir = self.memory.latest_auxdir(tex_path).or_else(|| {
            let target = self.build_target()?;
            self.memory.latest_auxdir(&target)
        })?;
        let tex_dir = path::parent(&path::to_slash(tex_path));
        let candidate = path::join(&path::join(&tex_dir, &auxdir), &file_name);
        if self.fs.exists(Path::new(&candidate)) {
            return Some(candidate);
        }

        tracing::debug!("No .fls file found for {}", tex_path.display());
        None
    }

    /// Locate a `.bib` file referenced from a document in `base_dir`
    ///
    /// `bib` may omit the `.bib` extension and may contain `*` wildcards in
    /// its file name, in which case every match is returned. Directories are
    /// searched in order: `base_dir`, each of `latex.bibDirs`, then the root
    /// directory. When nothing is found and `kpsewhich.bibtex.enabled` is
    /// set, kpsewhich gets the last word.
    pub fn bib_path(&self, bib: &str, base_dir: &Path) -> Vec<String> {
        let config = self.config();
        let dirs = self.bib_search_dirs(base_dir, &config.latex.bib_dirs);

        let found = if bib.contains('*') {
            self.glob_bib(&dirs, bib)
        } else {
            self.find_bib(&dirs, bib).into_iter().collect()
        };
        if !found.is_empty() {
            return found;
        }

        if config.kpsewhich.bibtex.enabled {
            let file_name = with_bib_ext(bib);
            if let Some(resolved) = self
                .kpsewhich
                .resolve(&config.kpsewhich.path, &file_name, true)
            {
                return vec![resolved];
            }
        }

        tracing::debug!("Cannot find .bib file {}", bib);
        Vec::new()
    }

    /// Resolve `file_name` through kpsewhich, memoized per session
    pub fn kpsewhich(&self, file_name: &str, is_bib: bool) -> Option<String> {
        let binary = self.config().kpsewhich.path;
        self.kpsewhich.resolve(&binary, file_name, is_bib)
    }

    /// Whole content of `path`
    pub fn read(&self, path: &Path) -> Result<String> {
        self.fs
            .read_to_string(path)
            .map_err(|e| LatexlabError::from_io(e, path))
    }

    /// Content of `path`, or `None` when it cannot be read
    pub fn read_optional(&self, path: &Path) -> Option<String> {
        match self.read(path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::debug!("Cannot read {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }

    /// Output directory of `tex_path` resolved against its directory
    fn resolved_out_dir(&self, tex_path: &Path) -> String {
        let tex_dir = path::parent(&path::to_slash(tex_path));
        path::join(&tex_dir, &self.out_dir(Some(tex_path)))
    }

    fn bib_search_dirs(&self, base_dir: &Path, bib_dirs: &[String]) -> Vec<String> {
        let mut dirs = vec![path::normalize(&path::to_slash(base_dir))];
        dirs.extend(bib_dirs.iter().map(|dir| path::normalize(dir)));
        if let Some(root) = &self.root {
            dirs.push(path::normalize(&path::to_slash(&root.dir)));
        }

        let mut seen = std::collections::HashSet::new();
        dirs.retain(|dir| seen.insert(dir.clone()));
        dirs
    }

    fn find_bib(&self, dirs: &[String], bib: &str) -> Option<String> {
        let mut names = vec![bib.to_string()];
        if !path::extension(bib).eq_ignore_ascii_case(BIB_EXT) {
            names.push(format!("{bib}{BIB_EXT}"));
        }

        dirs.iter()
            .flat_map(|dir| names.iter().map(move |name| path::join(dir, name)))
            .find(|candidate| self.fs.exists(Path::new(candidate)))
    }

    fn glob_bib(&self, dirs: &[String], bib: &str) -> Vec<String> {
        let pattern_dir = if bib.contains('/') {
            path::parent(bib)
        } else {
            String::new()
        };
        let pattern = with_bib_ext(path::file_name(bib));
        let Some(matcher) = bib_matcher(&pattern) else {
            return Vec::new();
        };

        let mut matches: Vec<String> = Vec::new();
        for dir in dirs {
            let search_dir = if pattern_dir.is_empty() {
                dir.clone()
            } else {
                path::join(dir, &pattern_dir)
            };
            let Ok(entries) = self.fs.list_dir(Path::new(&search_dir)) else {
                continue;
            };
            for name in entries {
                if !matcher.is_match(&name) {
                    continue;
                }
                let found = path::join(&search_dir, &name);
                if !matches.contains(&found) {
                    matches.push(found);
                }
            }
        }
        matches
    }
}

fn with_bib_ext(name: &str) -> String {
    if path::extension(name).eq_ignore_ascii_case(BIB_EXT) {
        name.to_string()
    } else {
        format!("{name}{BIB_EXT}")
    }
}

/// Compile a bib file name pattern where only `*` is special
fn bib_matcher(pattern: &str) -> Option<GlobMatcher> {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '?' | '[' | ']' | '{' | '}' => {
                escaped.push('[');
                escaped.push(c);
                escaped.push(']');
            }
            _ => escaped.push(c),
        }
    }
    match GlobBuilder::new(&escaped).literal_separator(true).build() {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(e) => {
            tracing::warn!("Invalid .bib pattern {}: {}", pattern, e);
            None
        }
    }
}
