mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    CatalogSettings, LlmSettings, LoggingSettings, ServerSettings, Settings, SplittingSettings,
    StorageSettings,
};
