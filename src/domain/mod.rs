mod model_option;
mod prompt_template;
mod race_card;
mod race_file_selection;
mod race_group;
mod race_number;
mod storage_path;

pub use model_option::ModelOption;
pub use prompt_template::{PromptKind, PromptTemplate, TemplateError};
pub use race_card::{PoolsCard, RaceCard, RaceHeader, SiteSummary};
pub use race_file_selection::{MAX_SELECTED_RACES, RaceFileSelection, SelectionError};
pub use race_group::{RaceGroup, RaceSplit, UNKNOWN_RACE_LABEL};
pub use race_number::RaceNumber;
pub use storage_path::{
    SPLITS_PREFIX, StoragePath, UPLOADS_PREFIX, file_stem, is_safe_segment, sanitize_file_name,
};
