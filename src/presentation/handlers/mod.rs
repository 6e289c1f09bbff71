mod analysis;
mod error;
mod health;
mod home;
mod manage;
mod models;
mod splits;

pub use analysis::{pools_handler, race_card_handler, site_summary_handler};
pub use error::{ErrorResponse, error_response};
pub use health::health_handler;
pub use home::home_handler;
pub use manage::{delete_handler, manage_handler};
pub use models::models_handler;
pub use splits::{process_handler, splits_handler, upload_handler};
