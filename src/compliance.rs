//! Day compliance classification
//!
//! A day's cached calorie total is judged against the calorie corridor
//! [macro floor, maintenance - subtract value]. Bounds always come from the
//! *current* profile's targets, even for historical days; no point-in-time
//! target snapshot is consulted.

use serde::{Deserialize, Serialize};

/// Classification of one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClassification {
    /// Total calories inside the corridor, bounds inclusive
    Compliant,
    /// Total calories outside the corridor on either side
    NonCompliant,
    /// No cached total for the day
    NoData,
}

impl DayClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayClassification::Compliant => "compliant",
            DayClassification::NonCompliant => "non_compliant",
            DayClassification::NoData => "no_data",
        }
    }
}

/// Evaluator for day compliance
pub struct ComplianceEvaluator;

impl ComplianceEvaluator {
    /// Classify a day's total calories against inclusive bounds.
    ///
    /// `lower_bound` is the macro-floor calories, `upper_bound` is
    /// maintenance minus the config subtract value.
    pub fn classify(
        day_total_calories: Option<f64>,
        lower_bound: f64,
        upper_bound: f64,
    ) -> DayClassification {
        match day_total_calories {
            None => DayClassification::NoData,
            Some(total) if total >= lower_bound && total <= upper_bound => {
                DayClassification::Compliant
            }
            Some(_) => DayClassification::NonCompliant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_data() {
        assert_eq!(
            ComplianceEvaluator::classify(None, 1500.0, 2000.0),
            DayClassification::NoData
        );
    }

    #[test]
    fn test_inside_corridor() {
        assert_eq!(
            ComplianceEvaluator::classify(Some(1800.0), 1500.0, 2000.0),
            DayClassification::Compliant
        );
    }

    #[test]
    fn test_outside_corridor() {
        assert_eq!(
            ComplianceEvaluator::classify(Some(2100.0), 1500.0, 2000.0),
            DayClassification::NonCompliant
        );
        assert_eq!(
            ComplianceEvaluator::classify(Some(1200.0), 1500.0, 2000.0),
            DayClassification::NonCompliant
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(
            ComplianceEvaluator::classify(Some(1500.0), 1500.0, 2000.0),
            DayClassification::Compliant
        );
        assert_eq!(
            ComplianceEvaluator::classify(Some(2000.0), 1500.0, 2000.0),
            DayClassification::Compliant
        );
    }
}
