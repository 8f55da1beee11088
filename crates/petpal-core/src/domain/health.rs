//! Health log types: records and activity charts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::pet::PetId;

/// Kind of entry in a pet's health log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordKind {
    Weight,
    Vaccine,
    Symptom,
    Medicine,
    Food,
    Water,
}

/// One entry in a pet's health log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetRecord {
    pub id: String,
    pub pet_id: PetId,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub date: NaiveDate,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Data for appending a record to the active pet's log.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPetRecord {
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub date: NaiveDate,
    pub value: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Granularity of the activity chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityPeriod {
    #[default]
    Weekly,
    Monthly,
}

impl ActivityPeriod {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// One bar of the activity chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub label: String,
    /// Active minutes; doubles as the bar height percentage.
    pub minutes: u32,
}

/// The activity chart for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySeries {
    pub period: ActivityPeriod,
    pub points: Vec<ActivityPoint>,
}

impl ActivitySeries {
    pub fn total_minutes(&self) -> u32 {
        self.points.iter().map(|p| p.minutes).sum()
    }
}
