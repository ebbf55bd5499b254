use serde::{Deserialize, Serialize};

use crate::errors::EstimateError;

/// Reported condition of a second-hand device.
///
/// `Used` is the catch-all default when a description carries no condition
/// signal at all. The two pricing paths weigh these values differently; see
/// `pricing::factors`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    New,
    LikeNew,
    Excellent,
    Good,
    Fair,
    Poor,
    #[default]
    Used,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::LikeNew => "like new",
            Condition::Excellent => "excellent",
            Condition::Good => "good",
            Condition::Fair => "fair",
            Condition::Poor => "poor",
            Condition::Used => "used",
        }
    }
}

impl std::str::FromStr for Condition {
    type Err = EstimateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase().replace('_', " ");
        match normalized.as_str() {
            "new" => Ok(Self::New),
            "like new" => Ok(Self::LikeNew),
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            "used" => Ok(Self::Used),
            _ => Err(EstimateError::UnknownCategory { kind: "condition", key: normalized }),
        }
    }
}

/// Structured attributes pulled out of a device description.
///
/// Brand, model, and specs stay empty strings when nothing matched; the
/// struct is always fully populated and never mutated after extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAttributes {
    pub brand: String,
    pub model: String,
    pub specs: String,
    pub condition: Condition,
}

#[cfg(test)]
mod tests {
    use super::Condition;

    #[test]
    fn condition_parses_snake_case_and_spaced_forms() {
        assert_eq!("like_new".parse::<Condition>().unwrap(), Condition::LikeNew);
        assert_eq!("Like New".parse::<Condition>().unwrap(), Condition::LikeNew);
        assert_eq!("poor".parse::<Condition>().unwrap(), Condition::Poor);
    }

    #[test]
    fn unknown_condition_reports_category() {
        let error = "pristine".parse::<Condition>().expect_err("pristine is not a condition");
        assert!(error.to_string().contains("condition"));
    }

    #[test]
    fn default_condition_is_used() {
        assert_eq!(Condition::default(), Condition::Used);
        assert_eq!(Condition::Used.label(), "used");
    }
}
