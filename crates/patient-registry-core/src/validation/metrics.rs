//! Age and body-mass index.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Parse a `YYYY-MM-DD` birth date.
///
/// A full ISO datetime is accepted; only its date part is used.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Age in whole years as of today (local time).
pub fn compute_age(birth_date: NaiveDate) -> i32 {
    compute_age_on(birth_date, Local::now().date_naive())
}

/// Age in whole years on `today`.
///
/// One year is subtracted when the birthday has not yet come round in
/// `today`'s year.
pub fn compute_age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Body-mass index, `weight / height²`.
///
/// Returns 0 for a non-positive height instead of dividing by zero.
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> f64 {
    if height_m <= 0.0 {
        return 0.0;
    }
    weight_kg / (height_m * height_m)
}

/// WHO adult BMI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_birth_date(s).unwrap()
    }

    #[test]
    fn test_age_birthday_boundary() {
        let birth = date("2000-06-15");
        assert_eq!(compute_age_on(birth, date("2024-06-14")), 23);
        assert_eq!(compute_age_on(birth, date("2024-06-15")), 24);
        assert_eq!(compute_age_on(birth, date("2024-12-31")), 24);
        assert_eq!(compute_age_on(birth, date("2025-01-01")), 24);
    }

    #[test]
    fn test_age_leap_day_birth() {
        let birth = date("2004-02-29");
        assert_eq!(compute_age_on(birth, date("2023-02-28")), 18);
        assert_eq!(compute_age_on(birth, date("2023-03-01")), 19);
    }

    #[test]
    fn test_age_today_is_not_negative_for_past_dates() {
        assert!(compute_age(date("1990-01-01")) >= 30);
    }

    #[test]
    fn test_parse_birth_date() {
        assert_eq!(
            parse_birth_date("2000-06-15T00:00:00Z"),
            NaiveDate::from_ymd_opt(2000, 6, 15)
        );
        assert!(parse_birth_date("").is_none());
        assert!(parse_birth_date("15/06/2000").is_none());
        assert!(parse_birth_date("2000-13-01").is_none());
    }

    #[test]
    fn test_bmi() {
        assert_eq!(compute_bmi(70.0, 1.75), 22.857142857142858);
        assert_eq!(compute_bmi(70.0, 0.0), 0.0);
        assert_eq!(compute_bmi(70.0, -1.0), 0.0);
    }

    #[test]
    fn test_bmi_category() {
        assert_eq!(BmiCategory::from_bmi(17.0), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(22.86), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(31.2), BmiCategory::Obese);
    }
}
