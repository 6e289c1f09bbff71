use std::fmt;

pub const UPLOADS_PREFIX: &str = "uploads";
pub const SPLITS_PREFIX: &str = "split_races";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn upload(filename: &str) -> Self {
        Self(format!("{}/{}", UPLOADS_PREFIX, filename))
    }

    pub fn splits_root() -> Self {
        Self(SPLITS_PREFIX.to_string())
    }

    pub fn split_directory(directory: &str) -> Self {
        Self(format!("{}/{}", SPLITS_PREFIX, directory))
    }

    pub fn split_file(directory: &str, filename: &str) -> Self {
        Self(format!("{}/{}/{}", SPLITS_PREFIX, directory, filename))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reduces an uploaded file name to a single safe path segment: ASCII
/// alphanumerics, `.`, `-` and `_`. Whitespace becomes `_`, any directory
/// part is dropped and leading dots/underscores are stripped.
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let mut cleaned = String::with_capacity(base.len());
    for ch in base.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            cleaned.push(ch);
        } else if ch.is_whitespace() {
            cleaned.push('_');
        }
    }

    let trimmed = cleaned.trim_start_matches(['.', '_']).to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// True when `segment` would survive [`sanitize_file_name`] unchanged.
pub fn is_safe_segment(segment: &str) -> bool {
    sanitize_file_name(segment).as_deref() == Some(segment) && segment != ".."
}

/// File name without its final extension.
pub fn file_stem(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    }
}
