//! Values the client derives locally instead of storing: body-mass index,
//! patient age, and the 12-hour appointment time display format.

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::errors::ParseError;

/// Body-mass index in kg/m², rounded to two decimals.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let meters = height_cm / 100.0;
    let raw = weight_kg / (meters * meters);
    (raw * 100.0).round() / 100.0
}

/// Whole years between `birth_date` and `today`, decremented when the
/// birthday has not yet occurred this year.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// "14:30" -> "02:30 PM". Accepts an optional seconds component.
pub fn to_12h(time24: &str) -> Result<String, ParseError> {
    let t = parse_any(time24)?;
    Ok(t.format("%I:%M %p").to_string())
}

/// "02:30 PM" -> "14:30". Already-24-hour input passes through with any
/// seconds stripped, so edits of stored values round-trip.
pub fn to_24h(display: &str) -> Result<String, ParseError> {
    let t = parse_any(display)?;
    Ok(t.format("%H:%M").to_string())
}

fn parse_any(s: &str) -> Result<NaiveTime, ParseError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .or_else(|_| NaiveTime::parse_from_str(s, "%I:%M %p"))
        .map_err(|_| ParseError::InvalidTime(s.to_string()))
}
