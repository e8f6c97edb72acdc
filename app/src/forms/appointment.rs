// app/src/forms/appointment.rs

use models::derived::{to_12h, to_24h};
use models::{Appointment, AppointmentDto, AppointmentSpecialty, AppointmentStatus};
use security::Identity;

use crate::forms::engine::{FieldSpec, Form, FormError, FormMode, Rule};

const STATUSES: &[&str] = &["PENDING", "CONFIRMED", "CANCELLED", "COMPLETED"];

fn appointment_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("date", "Fecha")
            .rule(Rule::Required("La fecha es requerida"))
            .rule(Rule::Date("Fecha inválida")),
        FieldSpec::new("time", "Hora")
            .rule(Rule::Required("La hora es requerida"))
            .rule(Rule::Time("Hora inválida")),
        FieldSpec::new("patientId", "Paciente")
            .rule(Rule::Required("El paciente es requerido"))
            .rule(Rule::Integer { min: 1, max: i64::MAX }),
        FieldSpec::new("doctorId", "Doctor")
            .rule(Rule::Required("El doctor es requerido"))
            .rule(Rule::Integer { min: 1, max: i64::MAX }),
        FieldSpec::new("specialty", "Especialidad")
            .rule(Rule::Required("La especialidad es requerida")),
        FieldSpec::new("status", "Estado")
            .rule(Rule::Required("El estado es requerido"))
            .rule(Rule::OneOf(STATUSES, "Estado inválido")),
        FieldSpec::new("reason", "Motivo").rule(Rule::Required("El motivo es requerido")),
    ]
}

/// Appointment scheduling form. The time input is 24-hour; the wire format is
/// the 12-hour display string, converted in both directions at this boundary.
/// When the submitter is a doctor the attending-doctor field is locked to
/// their own id.
pub struct AppointmentForm {
    pub form: Form,
}

impl AppointmentForm {
    pub fn new(submitter: Option<&Identity>) -> Self {
        let mut form = Form::new(appointment_fields(), FormMode::Create);
        form.seed("status", "PENDING");
        Self::lock_doctor(&mut form, submitter);
        AppointmentForm { form }
    }

    pub fn edit(appointment: &Appointment, submitter: Option<&Identity>) -> Self {
        let mut form = Form::new(appointment_fields(), FormMode::Edit);
        form.seed("date", appointment.date.to_string());
        // Stored as "HH:MM AM/PM"; the input edits the 24-hour shape.
        form.seed(
            "time",
            to_24h(&appointment.time).unwrap_or_else(|_| appointment.time.clone()),
        );
        form.seed("patientId", appointment.patient_id.to_string());
        form.seed("doctorId", appointment.doctor_id.to_string());
        form.seed("specialty", appointment.specialty.clone());
        form.seed("status", appointment.status.to_string());
        form.seed("reason", appointment.reason.clone());
        Self::lock_doctor(&mut form, submitter);
        AppointmentForm { form }
    }

    fn lock_doctor(form: &mut Form, submitter: Option<&Identity>) {
        if let Some(identity) = submitter {
            if identity.role.is_doctor() {
                if let Some(doctor_id) = identity.doctor_id {
                    form.seed("doctorId", doctor_id.to_string());
                }
                form.disable("doctorId");
            }
        }
    }

    pub fn payload(&self) -> Result<AppointmentDto, FormError> {
        self.form.ensure_submittable()?;
        let time_input = self.form.text("time");
        let specialty = self.form.text("specialty");
        // Free-text specialties from the catalog are accepted as-is; known
        // wire names are normalized through the enum.
        let specialty = specialty
            .parse::<AppointmentSpecialty>()
            .map(|s| s.to_string())
            .unwrap_or(specialty);
        Ok(AppointmentDto {
            date: self.form.date_value("date")?,
            time: to_12h(&time_input).map_err(|_| FormError::Invalid)?,
            reason: self.form.text("reason"),
            status: self
                .form
                .text("status")
                .parse::<AppointmentStatus>()
                .map_err(|_| FormError::Invalid)?,
            patient_id: self.form.i32_value("patientId")?,
            doctor_id: self.form.i32_value("doctorId")?,
            specialty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use security::Role;

    fn doctor_identity() -> Identity {
        Identity {
            id: 1,
            name: "Dra. Silva".into(),
            email: None,
            role: Role::Doctor,
            doctor_id: Some(14),
            nurse_id: None,
            token: "t".into(),
        }
    }

    fn fill(f: &mut AppointmentForm) {
        f.form.set("date", "2026-03-01");
        f.form.set("time", "14:30");
        f.form.set("patientId", "7");
        f.form.set("doctorId", "2");
        f.form.set("specialty", "CARDIOLOGY");
        f.form.set("reason", "Chequeo anual");
    }

    #[test]
    fn time_is_converted_to_the_twelve_hour_wire_format() {
        let mut f = AppointmentForm::new(None);
        fill(&mut f);
        let dto = f.payload().unwrap();
        assert_eq!(dto.time, "02:30 PM");
        assert_eq!(dto.status, AppointmentStatus::Pending);
        assert_eq!(dto.date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn doctor_submitter_gets_a_locked_doctor_field() {
        let identity = doctor_identity();
        let mut f = AppointmentForm::new(Some(&identity));
        fill(&mut f); // the doctorId set inside is ignored
        assert!(f.form.is_disabled("doctorId"));
        assert_eq!(f.payload().unwrap().doctor_id, 14);
    }

    #[test]
    fn editing_round_trips_the_stored_time() {
        let appointment = Appointment {
            id: 3,
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            time: "02:30 PM".into(),
            doctor_id: 2,
            patient_id: 7,
            specialty: "GENERAL".into(),
            status: AppointmentStatus::Confirmed,
            reason: "Control".into(),
            patient: None,
            doctor: None,
        };
        let f = AppointmentForm::edit(&appointment, None);
        assert_eq!(f.form.value("time"), "14:30");
        assert_eq!(f.payload().unwrap().time, "02:30 PM");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut f = AppointmentForm::new(None);
        fill(&mut f);
        f.form.set("status", "DONE");
        assert!(f.payload().is_err());
    }
}
