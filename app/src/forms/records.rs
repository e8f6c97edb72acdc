// app/src/forms/records.rs
//
// Clinical record forms: vital signs (with the reactively derived BMI),
// per-patient medical history, and the consultation written at finalization.

use models::derived::bmi;
use models::{
    MedicalConsultationDto, MedicalHistory, MedicalHistoryDto, VitalSigns, VitalSignsDto,
};

use crate::forms::engine::{FieldSpec, Form, FormError, FormMode, Rule};

fn vitals_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("temperature", "Temperatura (°C)")
            .rule(Rule::Required("Requerido"))
            .rule(Rule::Number { min: 30.0, max: 45.0 }),
        FieldSpec::new("systolicBP", "Presión sistólica")
            .rule(Rule::Required("Requerido"))
            .rule(Rule::Integer { min: 40, max: 250 }),
        FieldSpec::new("diastolicBP", "Presión diastólica")
            .rule(Rule::Required("Requerido"))
            .rule(Rule::Integer { min: 30, max: 150 }),
        FieldSpec::new("heartRate", "Frecuencia cardiaca")
            .rule(Rule::Required("Requerido"))
            .rule(Rule::Integer { min: 30, max: 250 }),
        FieldSpec::new("respiratoryRate", "Frecuencia respiratoria")
            .rule(Rule::Required("Requerido"))
            .rule(Rule::Integer { min: 8, max: 60 }),
        FieldSpec::new("oxygenSaturation", "Saturación de oxígeno (%)")
            .rule(Rule::Required("Requerido"))
            .rule(Rule::Integer { min: 50, max: 100 }),
        FieldSpec::new("weight", "Peso (kg)")
            .rule(Rule::Required("Requerido"))
            .rule(Rule::Number { min: 1.0, max: 300.0 }),
        FieldSpec::new("height", "Estatura (cm)")
            .rule(Rule::Required("Requerido"))
            .rule(Rule::Number { min: 30.0, max: 250.0 }),
    ]
}

/// Vital signs for one appointment. Blood pressure is edited as two numeric
/// inputs and joined to the "systolic/diastolic" wire string; BMI is derived
/// from the current weight and height on every read and never part of the
/// outgoing payload.
pub struct VitalSignsForm {
    pub form: Form,
    appointment_id: i32,
}

impl VitalSignsForm {
    pub fn new(appointment_id: i32) -> Self {
        let mut form = Form::new(vitals_fields(), FormMode::Create);
        form.seed("temperature", "37");
        form.seed("systolicBP", "120");
        form.seed("diastolicBP", "80");
        form.seed("heartRate", "70");
        form.seed("respiratoryRate", "16");
        form.seed("oxygenSaturation", "98");
        form.seed("weight", "70");
        form.seed("height", "170");
        VitalSignsForm { form, appointment_id }
    }

    pub fn edit(vitals: &VitalSigns) -> Self {
        let mut form = Form::new(vitals_fields(), FormMode::Edit);
        let (systolic, diastolic) = split_blood_pressure(&vitals.blood_pressure);
        form.seed("temperature", vitals.temperature.to_string());
        form.seed("systolicBP", systolic);
        form.seed("diastolicBP", diastolic);
        form.seed("heartRate", vitals.heart_rate.to_string());
        form.seed("respiratoryRate", vitals.respiratory_rate.to_string());
        form.seed("oxygenSaturation", vitals.oxygen_saturation.to_string());
        form.seed("weight", vitals.weight.to_string());
        form.seed("height", vitals.height.to_string());
        VitalSignsForm { form, appointment_id: vitals.appointment_id }
    }

    /// The derived BMI for the values currently entered, recomputed on every
    /// call. `None` while weight or height is not a parseable number.
    pub fn current_bmi(&self) -> Option<f64> {
        let weight: f64 = self.form.value("weight").trim().parse().ok()?;
        let height: f64 = self.form.value("height").trim().parse().ok()?;
        if height <= 0.0 {
            return None;
        }
        Some(bmi(weight, height))
    }

    pub fn payload(&self) -> Result<VitalSignsDto, FormError> {
        self.form.ensure_submittable()?;
        Ok(VitalSignsDto {
            appointment_id: self.appointment_id,
            temperature: self.form.f64_value("temperature")?,
            heart_rate: self.form.i32_value("heartRate")?,
            blood_pressure: format!(
                "{}/{}",
                self.form.text("systolicBP"),
                self.form.text("diastolicBP")
            ),
            oxygen_saturation: self.form.i32_value("oxygenSaturation")?,
            respiratory_rate: self.form.i32_value("respiratoryRate")?,
            weight: self.form.f64_value("weight")?,
            height: self.form.f64_value("height")?,
        })
    }
}

fn split_blood_pressure(raw: &str) -> (String, String) {
    match raw.split_once('/') {
        Some((s, d)) => (s.trim().to_string(), d.trim().to_string()),
        None => ("120".to_string(), "80".to_string()),
    }
}

fn history_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("allergies", "Alergias"),
        FieldSpec::new("medications", "Medicamentos"),
        FieldSpec::new("surgeries", "Cirugías"),
        FieldSpec::new("familyHistory", "Antecedentes familiares"),
        FieldSpec::new("chronicConditions", "Padecimientos crónicos"),
        FieldSpec::new("gestationalHistory", "Historial gestacional"),
        FieldSpec::new("reproductiveHistory", "Historial reproductivo"),
    ]
}

/// Medical history sections are all optional free text; empty sections are
/// omitted from the payload.
pub struct MedicalHistoryForm {
    pub form: Form,
    patient_id: i32,
}

impl MedicalHistoryForm {
    pub fn new(patient_id: i32) -> Self {
        MedicalHistoryForm {
            form: Form::new(history_fields(), FormMode::Create),
            patient_id,
        }
    }

    pub fn edit(history: &MedicalHistory) -> Self {
        let mut form = Form::new(history_fields(), FormMode::Edit);
        form.seed("allergies", history.allergies.clone().unwrap_or_default());
        form.seed("medications", history.medications.clone().unwrap_or_default());
        form.seed("surgeries", history.surgeries.clone().unwrap_or_default());
        form.seed("familyHistory", history.family_history.clone().unwrap_or_default());
        form.seed(
            "chronicConditions",
            history.chronic_conditions.clone().unwrap_or_default(),
        );
        form.seed(
            "gestationalHistory",
            history.gestational_history.clone().unwrap_or_default(),
        );
        form.seed(
            "reproductiveHistory",
            history.reproductive_history.clone().unwrap_or_default(),
        );
        MedicalHistoryForm { form, patient_id: history.patient_id }
    }

    pub fn payload(&self) -> Result<MedicalHistoryDto, FormError> {
        self.form.ensure_submittable()?;
        Ok(MedicalHistoryDto {
            patient_id: self.patient_id,
            allergies: self.form.opt_text("allergies"),
            medications: self.form.opt_text("medications"),
            surgeries: self.form.opt_text("surgeries"),
            family_history: self.form.opt_text("familyHistory"),
            chronic_conditions: self.form.opt_text("chronicConditions"),
            gestational_history: self.form.opt_text("gestationalHistory"),
            reproductive_history: self.form.opt_text("reproductiveHistory"),
        })
    }
}

fn consultation_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("symptoms", "Síntomas").rule(Rule::Required("Requerido")),
        FieldSpec::new("physicalExam", "Exploración física").rule(Rule::Required("Requerido")),
        FieldSpec::new("diagnosis", "Diagnóstico").rule(Rule::Required("Requerido")),
        FieldSpec::new("treatment", "Tratamiento").rule(Rule::Required("Requerido")),
        FieldSpec::new("recommendations", "Recomendaciones"),
        FieldSpec::new("followUp", "Seguimiento"),
        FieldSpec::new("notes", "Notas"),
    ]
}

/// The consultation written once at appointment finalization. Patient, doctor
/// and appointment are fixed by the flow, not edited here.
pub struct ConsultationForm {
    pub form: Form,
    patient_id: i32,
    doctor_id: i32,
    appointment_id: i32,
}

impl ConsultationForm {
    pub fn new(patient_id: i32, doctor_id: i32, appointment_id: i32) -> Self {
        ConsultationForm {
            form: Form::new(consultation_fields(), FormMode::Create),
            patient_id,
            doctor_id,
            appointment_id,
        }
    }

    pub fn payload(&self) -> Result<MedicalConsultationDto, FormError> {
        self.form.ensure_submittable()?;
        Ok(MedicalConsultationDto {
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            appointment_id: self.appointment_id,
            symptoms: self.form.text("symptoms"),
            physical_exam: self.form.text("physicalExam"),
            diagnosis: self.form.text("diagnosis"),
            treatment: self.form.text("treatment"),
            recommendations: self.form.text("recommendations"),
            follow_up: self.form.text("followUp"),
            notes: self.form.text("notes"),
        })
    }
}
