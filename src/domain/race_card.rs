use chrono::Local;

const DEFAULT_RACE_NUMBER: &str = "1";
const TIMESTAMP_SEPARATOR: &str = " • ";

/// Date, track and race number shared by the race-card and pools forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceHeader {
    pub race_date: String,
    pub track: String,
    pub race_number: String,
}

impl RaceHeader {
    /// Missing date defaults to today, missing race number to `1`.
    pub fn new(race_date: Option<String>, track: String, race_number: Option<String>) -> Self {
        Self {
            race_date: race_date
                .map(|d| d.trim().to_string())
                .unwrap_or_else(|| Local::now().date_naive().to_string()),
            track: track.trim().to_string(),
            race_number: race_number
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|| DEFAULT_RACE_NUMBER.to_string()),
        }
    }

    /// `YYYY-MM-DD • TRACK • Race N`, skipping empty parts.
    pub fn timestamp(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if !self.race_date.is_empty() {
            parts.push(self.race_date.clone());
        }
        if !self.track.is_empty() {
            parts.push(self.track.to_uppercase());
        }
        if !self.race_number.is_empty() {
            parts.push(format!("Race {}", self.race_number));
        }
        parts.join(TIMESTAMP_SEPARATOR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceCard {
    pub header: RaceHeader,
    pub speed_data: String,
    pub class_data: String,
    pub pace_data: String,
    pub user_insights: String,
}

impl RaceCard {
    pub fn has_data(&self) -> bool {
        [
            &self.header.track,
            &self.speed_data,
            &self.class_data,
            &self.pace_data,
            &self.user_insights,
        ]
        .iter()
        .any(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolsCard {
    pub header: RaceHeader,
    pub pools_data: String,
}

impl PoolsCard {
    pub fn has_data(&self) -> bool {
        !self.header.track.trim().is_empty() || !self.pools_data.trim().is_empty()
    }
}

/// Summary table and race-info line copied from a wagering site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSummary {
    pub race_info: String,
    pub summary_data: String,
    pub pace_data: String,
}

impl SiteSummary {
    pub fn has_data(&self) -> bool {
        [&self.race_info, &self.summary_data, &self.pace_data]
            .iter()
            .any(|field| !field.trim().is_empty())
    }
}
