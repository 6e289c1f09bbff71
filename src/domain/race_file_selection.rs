use super::storage_path::is_safe_segment;

pub const MAX_SELECTED_RACES: usize = 3;

/// Up to three split race files from one directory, chosen for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceFileSelection {
    directory: String,
    files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Please select a directory, 1-{max} files, and a model.", max = MAX_SELECTED_RACES)]
    Incomplete,
    #[error("Please select no more than {max} race files.", max = MAX_SELECTED_RACES)]
    TooMany,
    #[error("invalid name: {0}")]
    InvalidName(String),
}

impl RaceFileSelection {
    pub fn new(directory: String, files: Vec<String>) -> Result<Self, SelectionError> {
        let directory = directory.trim().to_string();
        if directory.is_empty() || files.is_empty() {
            return Err(SelectionError::Incomplete);
        }
        if files.len() > MAX_SELECTED_RACES {
            return Err(SelectionError::TooMany);
        }
        if !is_safe_segment(&directory) {
            return Err(SelectionError::InvalidName(directory));
        }
        if let Some(bad) = files.iter().find(|f| !is_safe_segment(f)) {
            return Err(SelectionError::InvalidName(bad.clone()));
        }

        Ok(Self { directory, files })
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }
}
