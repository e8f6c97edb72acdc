// client/src/http.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use models::{
    Appointment, AppointmentDto, CatalogItem, Doctor, DoctorDto, EmergencyContact,
    EmergencyContactDto, MedicalConsultation, MedicalConsultationDto, MedicalHistory,
    MedicalHistoryDto, Nurse, NurseDto, Patient, PatientDto, VitalSigns, VitalSignsDto,
};
use security::SessionStore;

use crate::api::{ClinicApi, LoginRequest};
use crate::config::ClientConfig;
use crate::envelope::Envelope;
use crate::error::{ApiError, ApiResult};

/// Reqwest-backed implementation of [`ClinicApi`]. Attaches the session's
/// bearer token to every request; no retries anywhere.
pub struct HttpClinicApi {
    http: reqwest::Client,
    config: ClientConfig,
    session: Arc<SessionStore>,
}

impl HttpClinicApi {
    pub fn new(config: ClientConfig, session: Arc<SessionStore>) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(HttpClinicApi { http, config, session })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "clinic api request");
        let mut rb = self.http.request(method, self.config.endpoint(path));
        if let Some(token) = self.session.token() {
            rb = rb.bearer_auth(token);
        }
        rb
    }

    /// Reads the response as an envelope. A body that is not an envelope is a
    /// decode error on 2xx and a status error otherwise; a parseable envelope
    /// wins over the status code.
    async fn send<T: DeserializeOwned>(&self, rb: RequestBuilder) -> ApiResult<Envelope<T>> {
        let resp = rb.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        match serde_json::from_str::<Envelope<T>>(&body) {
            Ok(env) => Ok(env),
            Err(e) if status.is_success() => Err(ApiError::Decode(e.to_string())),
            Err(_) if status == StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
            Err(_) => Err(ApiError::Status(status.as_u16())),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(self.request(Method::GET, path)).await?.into_result()
    }

    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Option<T>> {
        self.send(self.request(Method::GET, path)).await?.into_optional()
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send(self.request(Method::POST, path).json(body))
            .await?
            .into_result()
    }

    async fn put<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.send(self.request(Method::PUT, path).json(body))
            .await?
            .into_result()
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send::<serde_json::Value>(self.request(Method::DELETE, path))
            .await?
            .into_ack()
    }
}

#[async_trait]
impl ClinicApi for HttpClinicApi {
    async fn login(&self, credentials: LoginRequest) -> ApiResult<String> {
        self.post("/users/login", &credentials).await
    }

    async fn list_patients(&self) -> ApiResult<Vec<Patient>> {
        self.get("/patients").await
    }

    async fn get_patient(&self, id: i32) -> ApiResult<Patient> {
        self.get(&format!("/patients/{}", id)).await
    }

    async fn create_patient(&self, patient: PatientDto) -> ApiResult<Patient> {
        self.post("/patients", &patient).await
    }

    async fn update_patient(&self, id: i32, patient: PatientDto) -> ApiResult<Patient> {
        self.put(&format!("/patients/{}", id), &patient).await
    }

    async fn delete_patient(&self, id: i32) -> ApiResult<()> {
        self.delete(&format!("/patients/{}", id)).await
    }

    async fn create_emergency_contact(
        &self,
        contact: EmergencyContactDto,
    ) -> ApiResult<EmergencyContact> {
        self.post("/emergencyContact", &contact).await
    }

    async fn update_emergency_contact(
        &self,
        id: i32,
        contact: EmergencyContactDto,
    ) -> ApiResult<EmergencyContact> {
        self.put(&format!("/emergencyContact/{}", id), &contact).await
    }

    async fn list_appointments(&self) -> ApiResult<Vec<Appointment>> {
        self.get("/appointments").await
    }

    async fn get_appointment(&self, id: i32) -> ApiResult<Appointment> {
        self.get(&format!("/appointments/{}", id)).await
    }

    async fn appointments_by_patient(&self, patient_id: i32) -> ApiResult<Vec<Appointment>> {
        self.get(&format!("/appointments/patient/{}", patient_id)).await
    }

    async fn create_appointment(&self, appointment: AppointmentDto) -> ApiResult<Appointment> {
        self.post("/appointments", &appointment).await
    }

    async fn update_appointment(
        &self,
        id: i32,
        appointment: AppointmentDto,
    ) -> ApiResult<Appointment> {
        self.put(&format!("/appointments/{}", id), &appointment).await
    }

    async fn delete_appointment(&self, id: i32) -> ApiResult<()> {
        self.delete(&format!("/appointments/{}", id)).await
    }

    async fn list_doctors(&self) -> ApiResult<Vec<Doctor>> {
        self.get("/doctors").await
    }

    async fn get_doctor(&self, id: i32) -> ApiResult<Doctor> {
        self.get(&format!("/doctors/{}", id)).await
    }

    async fn create_doctor(&self, doctor: DoctorDto) -> ApiResult<Doctor> {
        self.post("/doctors", &doctor).await
    }

    async fn update_doctor(&self, id: i32, doctor: DoctorDto) -> ApiResult<Doctor> {
        self.put(&format!("/doctors/{}", id), &doctor).await
    }

    async fn delete_doctor(&self, id: i32) -> ApiResult<()> {
        self.delete(&format!("/doctors/{}", id)).await
    }

    async fn list_nurses(&self) -> ApiResult<Vec<Nurse>> {
        self.get("/nurses").await
    }

    async fn get_nurse(&self, id: i32) -> ApiResult<Nurse> {
        self.get(&format!("/nurses/{}", id)).await
    }

    async fn create_nurse(&self, nurse: NurseDto) -> ApiResult<Nurse> {
        self.post("/nurses", &nurse).await
    }

    async fn update_nurse(&self, id: i32, nurse: NurseDto) -> ApiResult<Nurse> {
        self.put(&format!("/nurses/{}", id), &nurse).await
    }

    async fn delete_nurse(&self, id: i32) -> ApiResult<()> {
        self.delete(&format!("/nurses/{}", id)).await
    }

    async fn specialties(&self) -> ApiResult<Vec<CatalogItem>> {
        self.get("/catalogs/specialties").await
    }

    async fn doctor_catalog(&self) -> ApiResult<Vec<CatalogItem>> {
        self.get("/catalogs/doctors").await
    }

    async fn vitals_by_appointment(&self, appointment_id: i32) -> ApiResult<Option<VitalSigns>> {
        let all: Option<Vec<VitalSigns>> = self
            .get_optional(&format!("/vitalSigns/appointment/{}", appointment_id))
            .await?;
        Ok(all.and_then(|mut list| {
            if list.is_empty() { None } else { Some(list.remove(0)) }
        }))
    }

    async fn create_vital_signs(&self, vitals: VitalSignsDto) -> ApiResult<VitalSigns> {
        self.post("/vitalSigns", &vitals).await
    }

    async fn update_vital_signs(&self, id: i32, vitals: VitalSignsDto) -> ApiResult<VitalSigns> {
        self.put(&format!("/vitalSigns/{}", id), &vitals).await
    }

    async fn history_by_patient(&self, patient_id: i32) -> ApiResult<Option<MedicalHistory>> {
        self.get_optional(&format!("/medicalHistory/patient/{}", patient_id))
            .await
    }

    async fn create_medical_history(
        &self,
        history: MedicalHistoryDto,
    ) -> ApiResult<MedicalHistory> {
        self.post("/medicalHistory", &history).await
    }

    async fn update_medical_history(
        &self,
        patient_id: i32,
        history: MedicalHistoryDto,
    ) -> ApiResult<MedicalHistory> {
        self.put(&format!("/medicalHistory/patient/{}", patient_id), &history)
            .await
    }

    async fn consultation_by_appointment(
        &self,
        appointment_id: i32,
    ) -> ApiResult<Option<MedicalConsultation>> {
        self.get_optional(&format!("/medical-consultations/appointment/{}", appointment_id))
            .await
    }

    async fn create_consultation(
        &self,
        consultation: MedicalConsultationDto,
    ) -> ApiResult<MedicalConsultation> {
        self.post("/medical-consultations", &consultation).await
    }
}
