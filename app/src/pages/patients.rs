// app/src/pages/patients.rs

use std::sync::Arc;

use chrono::Local;
use tracing::warn;

use client::ClinicApi;
use models::derived::age_on;
use models::{
    Appointment, EmergencyContactDto, MedicalHistory, MedicalHistoryDto, Patient, PatientDto,
};

use crate::pages::{Phase, SubFetch};
use crate::routes::Route;
use crate::table::{Column, ColumnKind, DataTable};
use crate::toast::ToastQueue;

fn patient_columns() -> Vec<Column<Patient>> {
    vec![
        Column::new("name", "Nombre", ColumnKind::Text, |p: &Patient| {
            p.full_name().into()
        })
        .sortable()
        .text_filter()
        .search_also(|p: &Patient| p.name.as_str().into())
        .search_also(|p: &Patient| p.last_name.as_str().into()),
        Column::new("age", "Edad", ColumnKind::Number, |p: &Patient| {
            age_on(p.birth_date, Local::now().date_naive()).into()
        })
        .sortable()
        .render_with(|p: &Patient| {
            format!("{} años", age_on(p.birth_date, Local::now().date_naive()))
        }),
        Column::new("gender", "Género", ColumnKind::Text, |p: &Patient| {
            p.gender.to_string().into()
        }),
        Column::new("phone", "Teléfono", ColumnKind::Text, |p: &Patient| {
            p.phone.as_str().into()
        })
        .text_filter(),
        Column::new("email", "Email", ColumnKind::Text, |p: &Patient| {
            p.email.as_str().into()
        })
        .sortable()
        .text_filter(),
        Column::new("isActive", "Activo", ColumnKind::Boolean, |p: &Patient| {
            p.is_active.into()
        })
        .bool_filter(),
        Column::actions("actions", "Acciones"),
    ]
}

pub struct PatientsPage {
    api: Arc<dyn ClinicApi>,
    toasts: Arc<ToastQueue>,
    pub phase: Phase,
    pub patients: Vec<Patient>,
    pub table: DataTable<Patient>,
    pending_delete: Option<i32>,
}

impl PatientsPage {
    pub fn new(api: Arc<dyn ClinicApi>, toasts: Arc<ToastQueue>) -> Self {
        PatientsPage {
            api,
            toasts,
            phase: Phase::Idle,
            patients: Vec::new(),
            table: DataTable::new(patient_columns()),
            pending_delete: None,
        }
    }

    pub async fn load(&mut self) {
        self.phase = Phase::Loading;
        match self.api.list_patients().await {
            Ok(patients) => {
                self.patients = patients;
                self.phase = Phase::Ready;
            }
            Err(e) => {
                warn!("patients fetch failed: {}", e);
                self.toasts.error(format!("Error al cargar pacientes: {}", e));
                self.phase = Phase::Error(e.to_string());
            }
        }
    }

    pub async fn create(&mut self, patient: PatientDto) {
        self.phase = Phase::Submitting;
        match self.api.create_patient(patient).await {
            Ok(_) => {
                self.toasts.success("Paciente creado correctamente");
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al crear paciente: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }

    pub async fn update(&mut self, id: i32, patient: PatientDto) {
        self.phase = Phase::Submitting;
        match self.api.update_patient(id, patient).await {
            Ok(_) => {
                self.toasts.success("Paciente actualizado correctamente");
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al actualizar paciente: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }

    /// Deleting asks for confirmation first; nothing is issued until
    /// [`confirm_delete`](Self::confirm_delete).
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
        match self.api.delete_patient(id).await {
            Ok(()) => {
                self.toasts.success("Paciente eliminado correctamente");
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al eliminar paciente: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }
}

/// Patient detail: the primary record plus medical history and appointment
/// sub-fetches, each behind its own flag.
pub struct PatientDetailPage {
    api: Arc<dyn ClinicApi>,
    toasts: Arc<ToastQueue>,
    pub patient_id: i32,
    pub phase: Phase,
    pub patient: Option<Patient>,
    pub history: SubFetch<MedicalHistory>,
    pub appointments: SubFetch<Vec<Appointment>>,
}

impl PatientDetailPage {
    pub fn new(api: Arc<dyn ClinicApi>, toasts: Arc<ToastQueue>, patient_id: i32) -> Self {
        PatientDetailPage {
            api,
            toasts,
            patient_id,
            phase: Phase::Idle,
            patient: None,
            history: SubFetch::Pending,
            appointments: SubFetch::Pending,
        }
    }

    /// Fetches the patient, then its sub-resources concurrently. A failed
    /// primary fetch sends the caller back to the list page.
    pub async fn load(&mut self) -> Option<Route> {
        self.phase = Phase::Loading;
        match self.api.get_patient(self.patient_id).await {
            Ok(patient) => {
                self.patient = Some(patient);
            }
            Err(e) => {
                self.toasts.error(format!("Paciente no encontrado: {}", e));
                self.phase = Phase::Error(e.to_string());
                return Some(Route::Patients);
            }
        }

        let (history, appointments) = tokio::join!(
            self.api.history_by_patient(self.patient_id),
            self.api.appointments_by_patient(self.patient_id),
        );
        self.history = SubFetch::from_result(history);
        self.appointments = SubFetch::from_result(appointments.map(Some));
        self.phase = Phase::Ready;
        None
    }

    /// Creates or replaces the emergency contact depending on whether the
    /// loaded patient already has one.
    pub async fn save_contact(&mut self, contact: EmergencyContactDto) {
        let existing = self
            .patient
            .as_ref()
            .and_then(|p| p.emergency_contact.as_ref())
            .and_then(|c| c.id);
        self.phase = Phase::Submitting;
        let result = match existing {
            Some(id) => self.api.update_emergency_contact(id, contact).await,
            None => self.api.create_emergency_contact(contact).await,
        };
        match result {
            Ok(_) => {
                self.toasts.success("Contacto de emergencia guardado");
                let _ = self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al guardar contacto: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }

    pub async fn save_history(&mut self, history: MedicalHistoryDto) {
        let exists = self.history.value().is_some();
        self.phase = Phase::Submitting;
        let result = if exists {
            self.api.update_medical_history(self.patient_id, history).await
        } else {
            self.api.create_medical_history(history).await
        };
        match result {
            Ok(_) => {
                self.toasts.success("Historial médico guardado");
                let _ = self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al guardar historial: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }
}
