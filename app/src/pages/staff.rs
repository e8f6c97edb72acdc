// app/src/pages/staff.rs
//
// Doctor and nurse administration. Same list lifecycle as the other pages;
// creation goes through the two-step registration forms, deletion through an
// explicit confirmation.

use std::sync::Arc;

use tracing::warn;

use client::ClinicApi;
use models::{Doctor, DoctorDto, Nurse, NurseDto};

use crate::pages::Phase;
use crate::routes::Route;
use crate::table::{Column, ColumnKind, DataTable};
use crate::toast::ToastQueue;

fn doctor_columns() -> Vec<Column<Doctor>> {
    vec![
        Column::new("name", "Nombre", ColumnKind::Text, |d: &Doctor| d.full_name().into())
            .sortable()
            .text_filter()
            .search_also(|d: &Doctor| d.name.as_str().into())
            .search_also(|d: &Doctor| d.last_name.as_str().into()),
        Column::new("specialty", "Especialidad", ColumnKind::Text, |d: &Doctor| {
            d.specialty.as_str().into()
        })
        .sortable()
        .text_filter(),
        Column::new("license", "Cédula", ColumnKind::Text, |d: &Doctor| {
            d.license_number.as_str().into()
        }),
        Column::new("phone", "Teléfono", ColumnKind::Text, |d: &Doctor| {
            d.phone.as_str().into()
        }),
        Column::new("email", "Email", ColumnKind::Text, |d: &Doctor| {
            d.email.as_str().into()
        })
        .text_filter(),
        Column::actions("actions", "Acciones"),
    ]
}

fn nurse_columns() -> Vec<Column<Nurse>> {
    vec![
        Column::new("name", "Nombre", ColumnKind::Text, |n: &Nurse| n.full_name().into())
            .sortable()
            .text_filter()
            .search_also(|n: &Nurse| n.name.as_str().into())
            .search_also(|n: &Nurse| n.last_name.as_str().into()),
        Column::new("license", "Cédula", ColumnKind::Text, |n: &Nurse| {
            n.license.clone().into()
        }),
        Column::new("phone", "Teléfono", ColumnKind::Text, |n: &Nurse| {
            n.phone.as_str().into()
        }),
        Column::new("email", "Email", ColumnKind::Text, |n: &Nurse| {
            n.email.as_str().into()
        })
        .text_filter(),
        Column::actions("actions", "Acciones"),
    ]
}

pub struct DoctorsPage {
    api: Arc<dyn ClinicApi>,
    toasts: Arc<ToastQueue>,
    pub phase: Phase,
    pub doctors: Vec<Doctor>,
    pub table: DataTable<Doctor>,
    pending_delete: Option<i32>,
}

impl DoctorsPage {
    pub fn new(api: Arc<dyn ClinicApi>, toasts: Arc<ToastQueue>) -> Self {
        DoctorsPage {
            api,
            toasts,
            phase: Phase::Idle,
            doctors: Vec::new(),
            table: DataTable::new(doctor_columns()),
            pending_delete: None,
        }
    }

    pub async fn load(&mut self) {
        self.phase = Phase::Loading;
        match self.api.list_doctors().await {
            Ok(doctors) => {
                self.doctors = doctors;
                self.phase = Phase::Ready;
            }
            Err(e) => {
                warn!("doctors fetch failed: {}", e);
                self.toasts.error(format!("Error al cargar doctores: {}", e));
                self.phase = Phase::Error(e.to_string());
            }
        }
    }

    pub async fn create(&mut self, doctor: DoctorDto) {
        self.phase = Phase::Submitting;
        match self.api.create_doctor(doctor).await {
            Ok(_) => {
                self.toasts.success("Doctor registrado correctamente");
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al registrar doctor: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }

    pub async fn update(&mut self, id: i32, doctor: DoctorDto) {
        self.phase = Phase::Submitting;
        match self.api.update_doctor(id, doctor).await {
            Ok(_) => {
                self.toasts.success("Doctor actualizado correctamente");
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al actualizar doctor: {}", e));
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
        match self.api.delete_doctor(id).await {
            Ok(()) => {
                self.toasts.success("Doctor eliminado correctamente");
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al eliminar doctor: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }
}

pub struct DoctorDetailPage {
    api: Arc<dyn ClinicApi>,
    toasts: Arc<ToastQueue>,
    pub doctor_id: i32,
    pub phase: Phase,
    pub doctor: Option<Doctor>,
}

impl DoctorDetailPage {
    pub fn new(api: Arc<dyn ClinicApi>, toasts: Arc<ToastQueue>, doctor_id: i32) -> Self {
        DoctorDetailPage { api, toasts, doctor_id, phase: Phase::Idle, doctor: None }
    }

    pub async fn load(&mut self) -> Option<Route> {
        self.phase = Phase::Loading;
        match self.api.get_doctor(self.doctor_id).await {
            Ok(doctor) => {
                self.doctor = Some(doctor);
                self.phase = Phase::Ready;
                None
            }
            Err(e) => {
                self.toasts.error(format!("Doctor no encontrado: {}", e));
                self.phase = Phase::Error(e.to_string());
                Some(Route::Doctors)
            }
        }
    }
}

pub struct NursesPage {
    api: Arc<dyn ClinicApi>,
    toasts: Arc<ToastQueue>,
    pub phase: Phase,
    pub nurses: Vec<Nurse>,
    pub table: DataTable<Nurse>,
    pending_delete: Option<i32>,
}

impl NursesPage {
    pub fn new(api: Arc<dyn ClinicApi>, toasts: Arc<ToastQueue>) -> Self {
        NursesPage {
            api,
            toasts,
            phase: Phase::Idle,
            nurses: Vec::new(),
            table: DataTable::new(nurse_columns()),
            pending_delete: None,
        }
    }

    pub async fn load(&mut self) {
        self.phase = Phase::Loading;
        match self.api.list_nurses().await {
            Ok(nurses) => {
                self.nurses = nurses;
                self.phase = Phase::Ready;
            }
            Err(e) => {
                warn!("nurses fetch failed: {}", e);
                self.toasts.error(format!("Error al cargar enfermeras: {}", e));
                self.phase = Phase::Error(e.to_string());
            }
        }
    }

    pub async fn create(&mut self, nurse: NurseDto) {
        self.phase = Phase::Submitting;
        match self.api.create_nurse(nurse).await {
            Ok(_) => {
                self.toasts.success("Enfermera registrada correctamente");
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al registrar enfermera: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }

    pub async fn update(&mut self, id: i32, nurse: NurseDto) {
        self.phase = Phase::Submitting;
        match self.api.update_nurse(id, nurse).await {
            Ok(_) => {
                self.toasts.success("Enfermera actualizada correctamente");
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al actualizar enfermera: {}", e));
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
        match self.api.delete_nurse(id).await {
            Ok(()) => {
                self.toasts.success("Enfermera eliminada correctamente");
                self.load().await;
            }
            Err(e) => {
                self.toasts.error(format!("Error al eliminar enfermera: {}", e));
                self.phase = Phase::Ready;
            }
        }
    }
}

pub struct NurseDetailPage {
    api: Arc<dyn ClinicApi>,
    toasts: Arc<ToastQueue>,
    pub nurse_id: i32,
    pub phase: Phase,
    pub nurse: Option<Nurse>,
}

impl NurseDetailPage {
    pub fn new(api: Arc<dyn ClinicApi>, toasts: Arc<ToastQueue>, nurse_id: i32) -> Self {
        NurseDetailPage { api, toasts, nurse_id, phase: Phase::Idle, nurse: None }
    }

    pub async fn load(&mut self) -> Option<Route> {
        self.phase = Phase::Loading;
        match self.api.get_nurse(self.nurse_id).await {
            Ok(nurse) => {
                self.nurse = Some(nurse);
                self.phase = Phase::Ready;
                None
            }
            Err(e) => {
                self.toasts.error(format!("Enfermera no encontrada: {}", e));
                self.phase = Phase::Error(e.to_string());
                Some(Route::Nurses)
            }
        }
    }
}
