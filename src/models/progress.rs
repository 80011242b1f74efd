use serde::{Deserialize, Serialize};

/// Single weigh-in. `date` is kept as the ISO string it was recorded with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    pub date: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressPhoto {
    pub url: String,
    pub date: String,
}

/// Progress record of one student. The weight series is ordered by date ascending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressEntry {
    #[serde(rename = "id_usuario")]
    pub user_id: String,
    #[serde(default)]
    pub weight: Vec<WeightEntry>,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    #[serde(default)]
    pub photos: Vec<ProgressPhoto>,
}

impl ProgressEntry {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            weight: Vec::new(),
            measurements: Vec::new(),
            photos: Vec::new(),
        }
    }

    /// Append a weigh-in and restore date ordering
    pub fn record_weight(&mut self, entry: WeightEntry) {
        self.weight.push(entry);
        self.weight.sort_by(|a, b| a.date.cmp(&b.date));
    }

    /// Most recent weigh-in by date
    pub fn latest_weight(&self) -> Option<&WeightEntry> {
        self.weight.iter().max_by(|a, b| a.date.cmp(&b.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, value: f64) -> WeightEntry {
        WeightEntry {
            date: date.to_string(),
            value,
        }
    }

    #[test]
    fn test_record_weight_keeps_order() {
        let mut progress = ProgressEntry::new("s1");
        progress.record_weight(entry("2024-03-01", 80.0));
        progress.record_weight(entry("2024-01-01", 82.0));
        progress.record_weight(entry("2024-02-01", 81.0));

        let dates: Vec<&str> = progress.weight.iter().map(|w| w.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-02-01", "2024-03-01"]);
        assert_eq!(progress.latest_weight().map(|w| w.value), Some(80.0));
    }

    #[test]
    fn test_latest_weight_on_unsorted_fixture() {
        let progress = ProgressEntry {
            weight: vec![entry("2024-05-01", 70.0), entry("2024-01-01", 75.0)],
            ..ProgressEntry::new("s1")
        };
        assert_eq!(progress.latest_weight().map(|w| w.date.as_str()), Some("2024-05-01"));
    }
}
