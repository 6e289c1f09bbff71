use std::fmt;
use std::num::NonZeroU32;
use std::sync::LazyLock;

use regex::Regex;

static RACE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Race\s+(\d+)").expect("race marker pattern is valid"));

/// Positive race number printed on a past-performance page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RaceNumber(NonZeroU32);

impl RaceNumber {
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// First `Race <digits>` marker in `text`. Zero and overflowing values
    /// count as no marker.
    pub fn extract(text: &str) -> Option<Self> {
        let captures = RACE_MARKER.captures(text)?;
        let digits = captures.get(1)?.as_str();
        digits.parse::<u32>().ok().and_then(Self::new)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for RaceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
