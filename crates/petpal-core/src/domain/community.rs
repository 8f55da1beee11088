//! Community meetups and the insurance summary.

use serde::{Deserialize, Serialize};

/// A neighbourhood meetup listed on the community board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meetup {
    pub title: String,
    pub location: String,
    pub time: String,
    pub members: u32,
    pub category: String,
}

/// A past or pending insurance claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceClaim {
    pub title: String,
    pub date: String,
    /// Amount in won.
    pub amount: u64,
    pub settled: bool,
}

/// Insurance overview for the active pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceSummary {
    pub pet_name: String,
    pub plan: String,
    pub insurer: String,
    /// Share of eligible costs reimbursed, in percent.
    pub coverage_percent: u8,
    /// Annual limit in won.
    pub annual_limit: u64,
    /// Amount already reimbursed this year, in won.
    pub used: u64,
    pub claims: Vec<InsuranceClaim>,
}

impl InsuranceSummary {
    /// Percentage of the annual limit already used, clamped to 100.
    pub fn usage_percent(&self) -> u8 {
        if self.annual_limit == 0 {
            return 100;
        }
        let pct = (self.used.saturating_mul(100) / self.annual_limit).min(100);
        u8::try_from(pct).unwrap_or(100)
    }

    pub fn remaining(&self) -> u64 {
        self.annual_limit.saturating_sub(self.used)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(used: u64, limit: u64) -> InsuranceSummary {
        InsuranceSummary {
            pet_name: "Miho".to_string(),
            plan: "Basic".to_string(),
            insurer: "Acme".to_string(),
            coverage_percent: 70,
            annual_limit: limit,
            used,
            claims: Vec::new(),
        }
    }

    #[test]
    fn test_usage_percent() {
        assert_eq!(summary(650_000, 1_000_000).usage_percent(), 65);
        assert_eq!(summary(2_000_000, 1_000_000).usage_percent(), 100);
        assert_eq!(summary(0, 0).usage_percent(), 100);
    }

    #[test]
    fn test_remaining_saturates() {
        assert_eq!(summary(650_000, 1_000_000).remaining(), 350_000);
        assert_eq!(summary(2_000_000, 1_000_000).remaining(), 0);
    }
}
