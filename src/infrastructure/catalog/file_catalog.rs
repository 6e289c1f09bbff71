use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::{Catalog, Resolved};
use crate::domain::{ModelOption, PromptKind, PromptTemplate};
use crate::presentation::config::CatalogSettings;

/// Reads the model list and prompt templates from disk on every call, so
/// edits to those files take effect without a restart.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    models_file: PathBuf,
    race_card_prompt: PathBuf,
    pools_prompt: PathBuf,
    site_summary_prompt: PathBuf,
}

impl FileCatalog {
    pub fn new(settings: &CatalogSettings) -> Self {
        let base = PathBuf::from(&settings.base_dir);
        Self {
            models_file: base.join(&settings.models_file),
            race_card_prompt: base.join(&settings.race_card_prompt),
            pools_prompt: base.join(&settings.pools_prompt),
            site_summary_prompt: base.join(&settings.site_summary_prompt),
        }
    }

    fn template_path(&self, kind: PromptKind) -> &Path {
        match kind {
            PromptKind::RaceCard => &self.race_card_prompt,
            PromptKind::Pools => &self.pools_prompt,
            PromptKind::SiteSummary => &self.site_summary_prompt,
        }
    }
}

#[async_trait]
impl Catalog for FileCatalog {
    async fn models(&self) -> Resolved<Vec<ModelOption>> {
        let path = &self.models_file;

        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) => {
                return Resolved::builtin(
                    ModelOption::builtin(),
                    format!("cannot read {}: {e}", path.display()),
                );
            }
        };

        match serde_json::from_str::<Vec<ModelOption>>(&raw) {
            Ok(models) if models.is_empty() => Resolved::builtin(
                ModelOption::builtin(),
                format!("{} lists no models", path.display()),
            ),
            Ok(models) => Resolved::from_file(models, path),
            Err(e) => Resolved::builtin(
                ModelOption::builtin(),
                format!("cannot parse {}: {e}", path.display()),
            ),
        }
    }

    async fn prompt_template(&self, kind: PromptKind) -> Resolved<PromptTemplate> {
        let path = self.template_path(kind);

        match tokio::fs::read_to_string(path).await {
            Ok(source) => Resolved::from_file(PromptTemplate::new(source), path),
            Err(e) => Resolved::builtin(
                kind.builtin_template(),
                format!("cannot read {}: {e}", path.display()),
            ),
        }
    }
}
