use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::{ModelOption, PromptKind, PromptTemplate};

/// Where a resolved configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    File(PathBuf),
    BuiltIn { reason: String },
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::File(path) => write!(f, "file {}", path.display()),
            Provenance::BuiltIn { reason } => write!(f, "built-in default ({})", reason),
        }
    }
}

/// A value read from an external source, or the built-in default together
/// with the reason the external source was not used.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Resolved<T> {
    pub fn from_file(value: T, path: impl Into<PathBuf>) -> Self {
        Self {
            value,
            provenance: Provenance::File(path.into()),
        }
    }

    pub fn builtin(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            provenance: Provenance::BuiltIn {
                reason: reason.into(),
            },
        }
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        match &self.provenance {
            Provenance::BuiltIn { reason } => Some(reason),
            Provenance::File(_) => None,
        }
    }
}

#[async_trait]
pub trait Catalog: Send + Sync {
    async fn models(&self) -> Resolved<Vec<ModelOption>>;

    async fn prompt_template(&self, kind: PromptKind) -> Resolved<PromptTemplate>;
}
