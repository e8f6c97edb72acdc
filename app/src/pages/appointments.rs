// app/src/pages/appointments.rs

use std::sync::Arc;

use tracing::warn;

use client::ClinicApi;
use models::{
    Appointment, AppointmentDto, AppointmentSpecialty, AppointmentStatus, CatalogItem,
    MedicalConsultation, MedicalHistory, VitalSigns, VitalSignsDto,
};

use crate::pages::{Phase, SubFetch};
use crate::routes::Route;
use crate::table::{Column, ColumnKind, DataTable};
use crate::toast::ToastQueue;

fn specialty_options() -> Vec<CatalogItem> {
    AppointmentSpecialty::ALL
        .iter()
        .map(|s| CatalogItem { id: s.as_str().to_string(), name: s.as_str().to_string() })
        .collect()
}

fn status_options() -> Vec<CatalogItem> {
    ["PENDING", "CONFIRMED", "CANCELLED", "COMPLETED"]
        .iter()
        .map(|s| CatalogItem { id: (*s).to_string(), name: (*s).to_string() })
        .collect()
}

fn appointment_columns() -> Vec<Column<Appointment>> {
    vec![
        Column::new("date", "Fecha", ColumnKind::Date, |a: &Appointment| a.date.into())
            .sortable(),
        Column::new("time", "Hora", ColumnKind::Text, |a: &Appointment| {
            a.time.as_str().into()
        }),
        Column::new("patient", "Paciente", ColumnKind::Text, |a: &Appointment| {
            a.patient
                .as_ref()
                .map(|p| p.full_name())
                .into()
        })
        .sortable()
        .text_filter()
        .search_also(|a: &Appointment| {
            a.patient.as_ref().map(|p| p.name.clone()).into()
        })
        .search_also(|a: &Appointment| {
            a.patient.as_ref().map(|p| p.last_name.clone()).into()
        }),
        Column::new("specialty", "Especialidad", ColumnKind::Catalog, |a: &Appointment| {
            a.specialty.as_str().into()
        })
        .catalog_filter(specialty_options()),
        Column::new("status", "Estado", ColumnKind::Catalog, |a: &Appointment| {
            a.status.to_string().into()
        })
        .sortable()
        .catalog_filter(status_options()),
        Column::new("reason", "Motivo", ColumnKind::Text, |a: &Appointment| {
            a.reason.as_str().into()
        })
        .text_filter(),
        Column::actions("actions", "Acciones"),
    ]
}

/// An update payload that keeps every stored field and changes the status.
fn with_status(appointment: &Appointment, status: AppointmentStatus) -> AppointmentDto {
    AppointmentDto {
        date: appointment.date,
        time: appointment.time.clone(),
        reason: appointment.reason.clone(),
        status,
        patient_id: appointment.patient_id,
        doctor_id: appointment.doctor_id,
        specialty: appointment.specialty.clone(),
    }
}

pub struct AppointmentsPage {
    api: Arc<dyn ClinicApi>,
    toasts: Arc<ToastQueue>,
    pub phase: Phase,
    pub appointments: Vec<Appointment>,
    pub table: DataTable<Appointment>,
    pending_cancel: Option<i32>,
    pending_delete: Option<i32>,
}

impl AppointmentsPage {
    pub fn new(api: Arc<dyn ClinicApi>, toasts: Arc<ToastQueue>) -> Self {
        AppointmentsPage {
            api,
            toasts,
            phase: Phase::Idle,
            appointments: Vec::new(),
            table: DataTable::new(appointment_columns()),
            pending_cancel: None,
            pending_delete: None,
        }
    }

    pub async fn load(&mut self) {
        self.phase = Phase::Loading;
        match self.api.list_appointments().await {
            Ok(appointments) => {
                self.appointments = appointments;
                self.phase = Phase::Ready;
            }
            Err(e) => {
                warn!("appointments fetch failed: {}", e);
                self.toasts.error(format!("Error al cargar citas: {}", e));
                self.phase = Phase::Error(e.to_string());
            }
        }
    }

    pub async fn create(&mut self, appointment: AppointmentDto) {
        self.phase = Phase::Submitting;
        match self.api.create_appointment(appointment).await {
            Ok(_) => {
                self.toasts.success("Cita creada correctamente");
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al crear cita: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }

    pub async fn update(&mut self, id: i32, appointment: AppointmentDto) {
        self.phase = Phase::Submitting;
        match self.api.update_appointment(id, appointment).await {
            Ok(_) => {
                self.toasts.success("Cita actualizada correctamente");
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al actualizar cita: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }

    /// Confirms a pending appointment directly; the transition table guards
    /// terminal states.
    pub async fn confirm_appointment(&mut self, id: i32) {
        self.transition(id, AppointmentStatus::Confirmed).await;
    }

    /// Cancelling is destructive and asks for confirmation first.
    pub fn request_cancel(&mut self, id: i32) {
        self.pending_cancel = Some(id);
    }

    pub fn pending_cancel(&self) -> Option<i32> {
        self.pending_cancel
    }

    pub fn dismiss_cancel(&mut self) {
        self.pending_cancel = None;
    }

    pub async fn confirm_cancel(&mut self) {
        let Some(id) = self.pending_cancel.take() else { return };
        self.transition(id, AppointmentStatus::Cancelled).await;
    }

    async fn transition(&mut self, id: i32, next: AppointmentStatus) {
        let Some(current) = self.appointments.iter().find(|a| a.id == id) else {
            return;
        };
        if !current.status.can_transition_to(next) {
            self.toasts
                .warning(format!("Una cita {} no puede pasar a {}", current.status, next));
            return;
        }
        let payload = with_status(current, next);
        self.phase = Phase::Submitting;
        match self.api.update_appointment(id, payload).await {
            Ok(_) => {
                self.toasts.success(format!("Cita marcada como {}", next));
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al actualizar cita: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }

    pub fn request_delete(&mut self, id: i32) {
        self.pending_delete = Some(id);
    }

    pub fn pending_delete(&self) -> Option<i32> {
        self.pending_delete
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else { return };
        self.phase = Phase::Submitting;
        match self.api.delete_appointment(id).await {
            Ok(()) => {
                self.toasts.success("Cita eliminada correctamente");
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al eliminar cita: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }
}

/// Appointment detail: the appointment itself, then vital signs, the
/// patient's medical history and the consultation fetched concurrently.
pub struct AppointmentDetailPage {
    api: Arc<dyn ClinicApi>,
    toasts: Arc<ToastQueue>,
    pub appointment_id: i32,
    pub phase: Phase,
    pub appointment: Option<Appointment>,
    pub vitals: SubFetch<VitalSigns>,
    pub history: SubFetch<MedicalHistory>,
    pub consultation: SubFetch<MedicalConsultation>,
}

impl AppointmentDetailPage {
    pub fn new(api: Arc<dyn ClinicApi>, toasts: Arc<ToastQueue>, appointment_id: i32) -> Self {
        AppointmentDetailPage {
            api,
            toasts,
            appointment_id,
            phase: Phase::Idle,
            appointment: None,
            vitals: SubFetch::Pending,
            history: SubFetch::Pending,
            consultation: SubFetch::Pending,
        }
    }

    pub async fn load(&mut self) -> Option<Route> {
        self.phase = Phase::Loading;
        let appointment = match self.api.get_appointment(self.appointment_id).await {
            Ok(a) => a,
            Err(e) => {
                self.toasts.error(format!("Cita no encontrada: {}", e));
                self.phase = Phase::Error(e.to_string());
                return Some(Route::Appointments);
            }
        };

        let patient_id = appointment.patient_id;
        self.appointment = Some(appointment);

        let (vitals, history, consultation) = tokio::join!(
            self.api.vitals_by_appointment(self.appointment_id),
            self.api.history_by_patient(patient_id),
            self.api.consultation_by_appointment(self.appointment_id),
        );
        self.vitals = SubFetch::from_result(vitals);
        self.history = SubFetch::from_result(history);
        self.consultation = SubFetch::from_result(consultation);
        self.phase = Phase::Ready;
        None
    }

    /// Records vitals for this appointment, creating or updating depending on
    /// what the sub-fetch found.
    pub async fn save_vitals(&mut self, vitals: VitalSignsDto) {
        let existing = self.vitals.value().and_then(|v| v.id);
        self.phase = Phase::Submitting;
        let result = match existing {
            Some(id) => self.api.update_vital_signs(id, vitals).await,
            None => self.api.create_vital_signs(vitals).await,
        };
        match result {
            Ok(_) => {
                self.toasts.success("Signos vitales guardados");
                let _ = self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al guardar signos vitales: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::fake::{samples, FakeApi};
    use crate::table::FilterValue;

    fn setup() -> (Arc<FakeApi>, Arc<ToastQueue>) {
        (Arc::new(FakeApi::new()), Arc::new(ToastQueue::new()))
    }

    #[tokio::test]
    async fn status_filter_is_exact_match() {
        let (api, toasts) = setup();
        api.seed_appointment(samples::appointment(1, 7, AppointmentStatus::Pending));
        api.seed_appointment(samples::appointment(2, 7, AppointmentStatus::Confirmed));
        let mut page = AppointmentsPage::new(api, toasts);
        page.load().await;

        page.table
            .set_filter("status", FilterValue::Choice("PENDING".into()));
        let view = page.table.view(&page.appointments);
        assert_eq!(view.filtered_count, 1);
        assert_eq!(view.rows[0].id, 1);
    }

    #[tokio::test]
    async fn cancelling_requires_confirmation() {
        let (api, toasts) = setup();
        api.seed_appointment(samples::appointment(1, 7, AppointmentStatus::Pending));
        let mut page = AppointmentsPage::new(api.clone(), toasts);
        page.load().await;

        page.request_cancel(1);
        page.dismiss_cancel();
        page.confirm_cancel().await;
        assert_eq!(api.calls("update_appointment"), 0, "dismissed, nothing sent");

        page.request_cancel(1);
        page.confirm_cancel().await;
        assert_eq!(api.calls("update_appointment"), 1);
        assert_eq!(api.appointment_status(1), Some(AppointmentStatus::Cancelled));
    }

    #[tokio::test]
    async fn terminal_appointments_refuse_transitions() {
        let (api, toasts) = setup();
        api.seed_appointment(samples::appointment(1, 7, AppointmentStatus::Completed));
        let mut page = AppointmentsPage::new(api.clone(), toasts.clone());
        page.load().await;

        page.confirm_appointment(1).await;
        assert_eq!(api.calls("update_appointment"), 0);
        let warnings = toasts.drain();
        assert!(warnings
            .iter()
            .any(|t| t.kind == crate::toast::ToastKind::Warning));
    }

    #[tokio::test]
    async fn detail_loads_sub_resources_concurrently_and_partially() {
        let (api, toasts) = setup();
        api.seed_appointment(samples::appointment(5, 7, AppointmentStatus::Confirmed));
        api.seed_vitals(samples::vitals(5));
        api.fail("consultation_by_appointment");

        let mut page = AppointmentDetailPage::new(api, toasts, 5);
        assert!(page.load().await.is_none());
        assert_eq!(page.phase, Phase::Ready);
        assert!(page.vitals.value().is_some());
        assert!(page.history.is_absent());
        assert!(matches!(page.consultation, SubFetch::Failed(_)));
    }

    #[tokio::test]
    async fn missing_detail_navigates_back_to_the_list() {
        let (api, toasts) = setup();
        let mut page = AppointmentDetailPage::new(api, toasts, 404);
        assert_eq!(page.load().await, Some(Route::Appointments));
    }

    #[tokio::test]
    async fn vitals_save_creates_then_updates() {
        let (api, toasts) = setup();
        api.seed_appointment(samples::appointment(5, 7, AppointmentStatus::Confirmed));
        let mut page = AppointmentDetailPage::new(api.clone(), toasts, 5);
        page.load().await;
        assert!(page.vitals.is_absent());

        let dto = VitalSignsDto {
            appointment_id: 5,
            temperature: 36.8,
            heart_rate: 72,
            blood_pressure: "120/80".into(),
            oxygen_saturation: 98,
            respiratory_rate: 16,
            weight: 70.0,
            height: 170.0,
        };
        page.save_vitals(dto.clone()).await;
        assert_eq!(api.calls("create_vital_signs"), 1);
        assert!(page.vitals.value().is_some());

        page.save_vitals(dto).await;
        assert_eq!(api.calls("update_vital_signs"), 1);
    }
}
