// app/src/pages/consultation.rs
//
// Consultation entry for one appointment. Finalization writes the
// consultation, then moves the appointment to COMPLETED as a second call;
// the backend offers no transaction across the two, so a failure after the
// first call is reported distinctly instead of being folded into a generic
// error.

use std::sync::Arc;

use client::ClinicApi;
use models::{
    Appointment, AppointmentDto, AppointmentStatus, MedicalConsultationDto, VitalSigns,
};

use crate::pages::{Phase, SubFetch};
use crate::routes::Route;
use crate::toast::ToastQueue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// Consultation written and appointment COMPLETED.
    Finalized,
    /// Consultation written but the status update failed; the consultation
    /// exists on the backend and stays visible after the refetch.
    StatusUpdateFailed(String),
    /// Nothing was written.
    Failed(String),
}

pub struct ConsultationPage {
    api: Arc<dyn ClinicApi>,
    toasts: Arc<ToastQueue>,
    pub appointment_id: i32,
    pub phase: Phase,
    pub appointment: Option<Appointment>,
    pub vitals: SubFetch<VitalSigns>,
}

impl ConsultationPage {
    pub fn new(api: Arc<dyn ClinicApi>, toasts: Arc<ToastQueue>, appointment_id: i32) -> Self {
        ConsultationPage {
            api,
            toasts,
            appointment_id,
            phase: Phase::Idle,
            appointment: None,
            vitals: SubFetch::Pending,
        }
    }

    /// Appointment and vitals load concurrently; only the appointment is
    /// primary.
    pub async fn load(&mut self) -> Option<Route> {
        self.phase = Phase::Loading;
        let (appointment, vitals) = tokio::join!(
            self.api.get_appointment(self.appointment_id),
            self.api.vitals_by_appointment(self.appointment_id),
        );
        match appointment {
            Ok(a) => self.appointment = Some(a),
            Err(e) => {
                self.toasts.error(format!("Cita no encontrada: {}", e));
                self.phase = Phase::Error(e.to_string());
                return Some(Route::Appointments);
            }
        }
        self.vitals = SubFetch::from_result(vitals);
        self.phase = Phase::Ready;
        None
    }

    /// Informational indicator only: finalization proceeds regardless, the
    /// page just shows that no vitals were recorded for this appointment.
    pub fn vitals_missing(&self) -> bool {
        self.vitals.is_absent()
    }

    pub async fn finalize(&mut self, consultation: MedicalConsultationDto) -> FinalizeOutcome {
        let Some(appointment) = self.appointment.clone() else {
            return FinalizeOutcome::Failed("la cita no está cargada".to_string());
        };
        if !appointment.status.can_transition_to(AppointmentStatus::Completed) {
            let msg = format!("una cita {} no puede finalizarse", appointment.status);
            self.toasts.warning(msg.clone());
            return FinalizeOutcome::Failed(msg);
        }

        self.phase = Phase::Submitting;
        if let Err(e) = self.api.create_consultation(consultation).await {
            self.toasts.error(format!("Error al crear la consulta: {}", e));
            self.phase = Phase::Ready;
            return FinalizeOutcome::Failed(e.to_string());
        }

        let completed = AppointmentDto {
            date: appointment.date,
            time: appointment.time.clone(),
            reason: appointment.reason.clone(),
            status: AppointmentStatus::Completed,
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            specialty: appointment.specialty.clone(),
        };
        let outcome = match self.api.update_appointment(appointment.id, completed).await {
            Ok(_) => {
                self.toasts.success("Consulta finalizada correctamente");
                FinalizeOutcome::Finalized
            }
            Err(e) => {
                // The consultation already exists; say so instead of
                // pretending the whole operation failed.
                self.toasts.warning(format!(
                    "La consulta se guardó pero la cita no pudo marcarse como completada: {}",
                    e
                ));
                FinalizeOutcome::StatusUpdateFailed(e.to_string())
            }
        };
        let _ = self.load().await;
        outcome
    }
}
