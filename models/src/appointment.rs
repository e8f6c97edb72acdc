use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ParseError;
use crate::patient::Patient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Cancelled and Completed admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::Completed)
    }

    /// Allowed status transitions. Completed is only reached through the
    /// consultation finalization flow, but the table itself permits it from any
    /// live status so that flow can drive it.
    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;
        match (self, next) {
            (Pending, Confirmed) | (Pending, Cancelled) | (Pending, Completed) => true,
            (Confirmed, Cancelled) | (Confirmed, Completed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Completed => "COMPLETED",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for AppointmentStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(AppointmentStatus::Pending),
            "CONFIRMED" => Ok(AppointmentStatus::Confirmed),
            "CANCELLED" => Ok(AppointmentStatus::Cancelled),
            "COMPLETED" => Ok(AppointmentStatus::Completed),
            other => Err(ParseError::UnknownVariant {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentSpecialty {
    General,
    Pediatric,
    Surgical,
    Dental,
    Psychological,
    Gynecological,
    Obstetric,
    Cardiology,
    Pulmonary,
    Neurology,
    Rheumatology,
    Oncology,
    Dermatology,
    Gastroenterology,
    Urology,
    Nutrition,
}

impl AppointmentSpecialty {
    pub const ALL: [AppointmentSpecialty; 16] = [
        AppointmentSpecialty::General,
        AppointmentSpecialty::Pediatric,
        AppointmentSpecialty::Surgical,
        AppointmentSpecialty::Dental,
        AppointmentSpecialty::Psychological,
        AppointmentSpecialty::Gynecological,
        AppointmentSpecialty::Obstetric,
        AppointmentSpecialty::Cardiology,
        AppointmentSpecialty::Pulmonary,
        AppointmentSpecialty::Neurology,
        AppointmentSpecialty::Rheumatology,
        AppointmentSpecialty::Oncology,
        AppointmentSpecialty::Dermatology,
        AppointmentSpecialty::Gastroenterology,
        AppointmentSpecialty::Urology,
        AppointmentSpecialty::Nutrition,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentSpecialty::General => "GENERAL",
            AppointmentSpecialty::Pediatric => "PEDIATRIC",
            AppointmentSpecialty::Surgical => "SURGICAL",
            AppointmentSpecialty::Dental => "DENTAL",
            AppointmentSpecialty::Psychological => "PSYCHOLOGICAL",
            AppointmentSpecialty::Gynecological => "GYNECOLOGICAL",
            AppointmentSpecialty::Obstetric => "OBSTETRIC",
            AppointmentSpecialty::Cardiology => "CARDIOLOGY",
            AppointmentSpecialty::Pulmonary => "PULMONARY",
            AppointmentSpecialty::Neurology => "NEUROLOGY",
            AppointmentSpecialty::Rheumatology => "RHEUMATOLOGY",
            AppointmentSpecialty::Oncology => "ONCOLOGY",
            AppointmentSpecialty::Dermatology => "DERMATOLOGY",
            AppointmentSpecialty::Gastroenterology => "GASTROENTEROLOGY",
            AppointmentSpecialty::Urology => "UROLOGY",
            AppointmentSpecialty::Nutrition => "NUTRITION",
        }
    }
}

impl fmt::Display for AppointmentSpecialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentSpecialty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentSpecialty::ALL
            .iter()
            .copied()
            .find(|sp| sp.as_str() == s)
            .ok_or_else(|| ParseError::UnknownVariant {
                field: "specialty",
                value: s.to_string(),
            })
    }
}

/// An appointment as the backend returns it. `time` is the 12-hour display
/// string ("HH:MM AM/PM"); the patient snapshot is embedded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i32,
    pub date: NaiveDate,
    pub time: String,
    pub doctor_id: i32,
    pub patient_id: i32,
    pub specialty: String,
    pub status: AppointmentStatus,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<Patient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDto {
    pub date: NaiveDate,
    pub time: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub patient_id: i32,
    pub doctor_id: i32,
    pub specialty: String,
}
