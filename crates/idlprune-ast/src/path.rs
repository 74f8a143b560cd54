//! File path helpers

use std::path::{Component, Path, PathBuf};

/// Normalize a file path into the form used as a document identity
///
/// Absolute paths under the working directory become relative to it, `.`
/// components are dropped and `..` is folded lexically. Separators are
/// always `/` so identities are stable across platforms.
pub fn normalize_filename(path: &str) -> String {
    let raw = Path::new(path);
    let relative: PathBuf = match std::env::current_dir() {
        Ok(cwd) if raw.is_absolute() => raw
            .strip_prefix(&cwd)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| raw.to_path_buf()),
        _ => raw.to_path_buf(),
    };

    let mut parts: Vec<String> = Vec::new();
    let mut rooted = false;
    for component in relative.components() {
        match component {
            Component::RootDir => rooted = true,
            Component::Prefix(prefix) => parts.push(prefix.as_os_str().to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push("..".into()),
            },
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// File name without directory and final extension: `a/b/shared.thrift` -> `shared`
pub fn file_stem_name(path: &str) -> &str {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    }
}
