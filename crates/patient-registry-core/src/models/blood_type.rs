//! ABO/Rh blood types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the eight ABO/Rh blood groups.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[default]
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    /// All blood types in display order.
    pub const ALL: [BloodType; 8] = [
        BloodType::APositive,
        BloodType::ANegative,
        BloodType::BPositive,
        BloodType::BNegative,
        BloodType::AbPositive,
        BloodType::AbNegative,
        BloodType::OPositive,
        BloodType::ONegative,
    ];

    /// Display label (`"AB-"` etc.).
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::APositive => "A+",
            BloodType::ANegative => "A-",
            BloodType::BPositive => "B+",
            BloodType::BNegative => "B-",
            BloodType::AbPositive => "AB+",
            BloodType::AbNegative => "AB-",
            BloodType::OPositive => "O+",
            BloodType::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label is not one of the eight blood types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown blood type: {0}")]
pub struct UnknownBloodType(pub String);

impl FromStr for BloodType {
    type Err = UnknownBloodType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the typographic minus sign as well as ASCII '-'
        let label = s.trim().replace('\u{2212}', "-").to_uppercase();
        BloodType::ALL
            .iter()
            .copied()
            .find(|bt| bt.as_str() == label)
            .ok_or_else(|| UnknownBloodType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        for bt in BloodType::ALL {
            assert_eq!(bt.as_str().parse::<BloodType>().unwrap(), bt);
        }
        assert_eq!("ab-".parse::<BloodType>().unwrap(), BloodType::AbNegative);
        assert_eq!("O\u{2212}".parse::<BloodType>().unwrap(), BloodType::ONegative);
    }

    #[test]
    fn test_parse_unknown() {
        assert!("C+".parse::<BloodType>().is_err());
        assert!("".parse::<BloodType>().is_err());
    }

    #[test]
    fn test_serde_labels() {
        let json = serde_json::to_string(&BloodType::AbPositive).unwrap();
        assert_eq!(json, "\"AB+\"");
        let parsed: BloodType = serde_json::from_str("\"B-\"").unwrap();
        assert_eq!(parsed, BloodType::BNegative);
    }
}
