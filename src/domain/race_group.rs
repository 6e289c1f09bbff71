use super::race_number::RaceNumber;

pub const UNKNOWN_RACE_LABEL: &str = "unknown";

/// Contiguous run of page indices that resolve to the same race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceGroup {
    pub race_number: Option<RaceNumber>,
    pub pages: Vec<usize>,
}

impl RaceGroup {
    pub fn new(race_number: Option<RaceNumber>, pages: Vec<usize>) -> Self {
        Self { race_number, pages }
    }

    /// `Race_<n>`, or `Race_unknown` when no marker was ever seen.
    pub fn file_stem(&self) -> String {
        match self.race_number {
            Some(number) => format!("Race_{}", number),
            None => format!("Race_{}", UNKNOWN_RACE_LABEL),
        }
    }

    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.file_stem(), extension)
    }
}

/// A flushed group together with its serialized container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceSplit {
    pub race_number: Option<RaceNumber>,
    pub file_name: String,
    pub pages: Vec<usize>,
    pub bytes: Vec<u8>,
}
