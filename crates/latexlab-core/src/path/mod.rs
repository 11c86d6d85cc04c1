//! Forward-slash path strings
//!
//! Every path handed out by the resolvers is a `String` using `/` as the
//! separator, lexically normalized and without trailing slashes. Keeping one
//! textual form makes results comparable across platforms and lets them be
//! spliced into tool arguments unchanged.
//!
//! ## Platform Semantics
//!
//! - Backslashes are treated as separators on Windows only. On Unix a
//!   backslash is a legal file name character and is left alone.
//! - A drive prefix (`C:`) is only recognized on Windows.
//! - `Path::is_absolute()` reports `false` for `/tmp` on Windows, so callers
//!   validating user supplied locations use [`has_absolute_or_rooted_component`].
//!
//! ```rust
//! use latexlab_core::path::{normalize, join};
//!
//! assert_eq!(normalize("./build/"), "build");
//! assert_eq!(normalize("/proj/./out//pdf/"), "/proj/out/pdf");
//! assert_eq!(join("/proj", "build/../out"), "/proj/out");
//! ```

use std::path::{Component, Path};

const WINDOWS: bool = cfg!(windows);

/// Check if path is absolute OR rooted (cross-platform)
///
/// - Unix: `/tmp` → is_absolute() = true
/// - Windows: `/tmp` → is_absolute() = false (rooted, not absolute!)
/// - Windows: `C:\tmp` → is_absolute() = true
pub fn has_absolute_or_rooted_component(path: &Path) -> bool {
    if path.is_absolute() {
        return true;
    }

    path.components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
}

/// Render a filesystem path in the forward-slash form
pub fn to_slash(path: &Path) -> String {
    let text = path.to_string_lossy();
    if WINDOWS {
        text.replace('\\', "/")
    } else {
        text.into_owned()
    }
}

/// Split a forward-slash path into its root prefix and the remainder
///
/// The prefix is `""` for relative paths, `"/"` for rooted paths and
/// `"C:/"` (or `"C:"` when drive-relative) on Windows.
fn split_root(path: &str) -> (&str, &str) {
    let bytes = path.as_bytes();
    if WINDOWS && bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        if bytes.len() >= 3 && bytes[2] == b'/' {
            return (&path[..3], &path[3..]);
        }
        return (&path[..2], &path[2..]);
    }
    if let Some(rest) = path.strip_prefix('/') {
        return ("/", rest);
    }
    ("", path)
}

/// Lexically normalize a path string
///
/// Collapses `.`, `..` and repeated separators, strips trailing slashes and
/// converts separators to `/`. An empty relative result becomes `"."`.
/// The filesystem is never consulted.
pub fn normalize(path: &str) -> String {
    let unified = if WINDOWS {
        path.replace('\\', "/")
    } else {
        path.to_string()
    };
    let (prefix, body) = split_root(&unified);

    let mut parts: Vec<&str> = Vec::new();
    for part in body.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if prefix.is_empty() {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (prefix.is_empty(), joined.is_empty()) {
        (true, true) => ".".to_string(),
        (true, false) => joined,
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}{joined}"),
    }
}

/// Whether a path string is absolute (`/x`, or `C:/x` on Windows)
pub fn is_absolute(path: &str) -> bool {
    let unified = if WINDOWS {
        path.replace('\\', "/")
    } else {
        path.to_string()
    };
    split_root(&unified).0.ends_with('/')
}

/// Join `rel` onto `base`; an absolute `rel` replaces `base`
pub fn join(base: &str, rel: &str) -> String {
    if is_absolute(rel) || base.is_empty() {
        normalize(rel)
    } else {
        normalize(&format!("{base}/{rel}"))
    }
}

/// Directory portion of a path string
pub fn parent(path: &str) -> String {
    let norm = normalize(path);
    let (prefix, body) = split_root(&norm);
    match body.rfind('/') {
        Some(idx) => format!("{prefix}{}", &body[..idx]),
        None if !prefix.is_empty() => prefix.to_string(),
        None => ".".to_string(),
    }
}

/// Last component of a path string
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    let trimmed = if WINDOWS {
        trimmed.trim_end_matches('\\')
    } else {
        trimmed
    };
    let start = trimmed
        .rfind(|c: char| c == '/' || (WINDOWS && c == '\\'))
        .map_or(0, |idx| idx + 1);
    &trimmed[start..]
}

/// File name without its final extension
///
/// A leading dot (`.latexmkrc`) is part of the stem, not an extension.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// Final extension including the dot (`".tex"`), or `""`
pub fn extension(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => "",
        Some(idx) => &name[idx..],
    }
}

/// Path of `path` relative to `base`, both taken lexically
pub fn relative(base: &str, path: &str) -> String {
    let base = normalize(base);
    let path = normalize(path);
    let (base_prefix, base_body) = split_root(&base);
    let (path_prefix, path_body) = split_root(&path);
    if base_prefix != path_prefix {
        return path;
    }

    let base_parts: Vec<&str> = base_body
        .split('/')
        .filter(|p| !p.is_empty() && *p != ".")
        .collect();
    let path_parts: Vec<&str> = path_body
        .split('/')
        .filter(|p| !p.is_empty() && *p != ".")
        .collect();
    let common = base_parts
        .iter()
        .zip(path_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; base_parts.len() - common];
    parts.extend(&path_parts[common..]);
    parts.join("/")
}
