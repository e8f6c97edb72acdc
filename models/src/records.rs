use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vital signs taken for one appointment (one-to-one). `bmi` is derived from
/// weight and height and never edited on its own; mutation payloads strip it
/// so the backend recomputes from the same inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    pub id: Option<i32>,
    pub appointment_id: i32,
    /// Celsius.
    pub temperature: f64,
    /// Beats per minute.
    pub heart_rate: i32,
    /// "systolic/diastolic", e.g. "120/80".
    pub blood_pressure: String,
    /// Percent.
    pub oxygen_saturation: i32,
    /// Respirations per minute.
    pub respiratory_rate: i32,
    /// Kilograms.
    pub weight: f64,
    /// Centimeters.
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Outgoing vital-signs payload. Deliberately has no `bmi` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSignsDto {
    pub appointment_id: i32,
    pub temperature: f64,
    pub heart_rate: i32,
    pub blood_pressure: String,
    pub oxygen_saturation: i32,
    pub respiratory_rate: i32,
    pub weight: f64,
    pub height: f64,
}

impl From<&VitalSigns> for VitalSignsDto {
    fn from(v: &VitalSigns) -> Self {
        VitalSignsDto {
            appointment_id: v.appointment_id,
            temperature: v.temperature,
            heart_rate: v.heart_rate,
            blood_pressure: v.blood_pressure.clone(),
            oxygen_saturation: v.oxygen_saturation,
            respiratory_rate: v.respiratory_rate,
            weight: v.weight,
            height: v.height,
        }
    }
}

/// Per-patient medical background (one-to-one with the patient).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistory {
    pub id: Option<i32>,
    pub patient_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surgeries: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronic_conditions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gestational_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reproductive_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistoryDto {
    pub patient_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surgeries: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronic_conditions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gestational_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reproductive_history: Option<String>,
}

/// Written once when an appointment is finalized; read-only afterwards in
/// this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalConsultation {
    pub id: Option<i32>,
    pub patient_id: i32,
    pub doctor_id: i32,
    pub appointment_id: i32,
    pub symptoms: String,
    pub physical_exam: String,
    pub diagnosis: String,
    pub treatment: String,
    pub recommendations: String,
    pub follow_up: String,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalConsultationDto {
    pub patient_id: i32,
    pub doctor_id: i32,
    pub appointment_id: i32,
    pub symptoms: String,
    pub physical_exam: String,
    pub diagnosis: String,
    pub treatment: String,
    pub recommendations: String,
    pub follow_up: String,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vitals() -> VitalSigns {
        VitalSigns {
            id: Some(4),
            appointment_id: 12,
            temperature: 36.8,
            heart_rate: 72,
            blood_pressure: "120/80".into(),
            oxygen_saturation: 98,
            respiratory_rate: 16,
            weight: 70.0,
            height: 170.0,
            bmi: Some(24.22),
            created_at: None,
        }
    }

    #[test]
    fn vitals_payload_carries_no_bmi() {
        let dto = VitalSignsDto::from(&sample_vitals());
        let v = serde_json::to_value(&dto).unwrap();
        assert!(v.get("bmi").is_none());
        assert!(v.get("id").is_none());
        assert_eq!(v["appointmentId"], 12);
        assert_eq!(v["bloodPressure"], "120/80");
    }

    #[test]
    fn history_omits_empty_sections() {
        let dto = MedicalHistoryDto {
            patient_id: 3,
            allergies: Some("penicillin".into()),
            ..Default::default()
        };
        let v = serde_json::to_value(&dto).unwrap();
        assert_eq!(v["patientId"], 3);
        assert_eq!(v["allergies"], "penicillin");
        assert!(v.get("surgeries").is_none());
    }
}
