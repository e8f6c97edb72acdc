// client/src/api.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use models::{
    Appointment, AppointmentDto, CatalogItem, Doctor, DoctorDto, EmergencyContact,
    EmergencyContactDto, MedicalConsultation, MedicalConsultationDto, MedicalHistory,
    MedicalHistoryDto, Nurse, NurseDto, Patient, PatientDto, VitalSigns, VitalSignsDto,
};

use crate::error::ApiResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// One thin method per backend endpoint. Page containers depend on this trait
/// rather than on the HTTP implementation so they can be exercised against an
/// in-memory fake.
#[async_trait]
pub trait ClinicApi: Send + Sync {
    /// POST /users/login — returns the bearer token.
    async fn login(&self, credentials: LoginRequest) -> ApiResult<String>;

    async fn list_patients(&self) -> ApiResult<Vec<Patient>>;
    async fn get_patient(&self, id: i32) -> ApiResult<Patient>;
    async fn create_patient(&self, patient: PatientDto) -> ApiResult<Patient>;
    async fn update_patient(&self, id: i32, patient: PatientDto) -> ApiResult<Patient>;
    async fn delete_patient(&self, id: i32) -> ApiResult<()>;

    async fn create_emergency_contact(
        &self,
        contact: EmergencyContactDto,
    ) -> ApiResult<EmergencyContact>;
    async fn update_emergency_contact(
        &self,
        id: i32,
        contact: EmergencyContactDto,
    ) -> ApiResult<EmergencyContact>;

    async fn list_appointments(&self) -> ApiResult<Vec<Appointment>>;
    async fn get_appointment(&self, id: i32) -> ApiResult<Appointment>;
    async fn appointments_by_patient(&self, patient_id: i32) -> ApiResult<Vec<Appointment>>;
    async fn create_appointment(&self, appointment: AppointmentDto) -> ApiResult<Appointment>;
    async fn update_appointment(
        &self,
        id: i32,
        appointment: AppointmentDto,
    ) -> ApiResult<Appointment>;
    async fn delete_appointment(&self, id: i32) -> ApiResult<()>;

    async fn list_doctors(&self) -> ApiResult<Vec<Doctor>>;
    async fn get_doctor(&self, id: i32) -> ApiResult<Doctor>;
    async fn create_doctor(&self, doctor: DoctorDto) -> ApiResult<Doctor>;
    async fn update_doctor(&self, id: i32, doctor: DoctorDto) -> ApiResult<Doctor>;
    async fn delete_doctor(&self, id: i32) -> ApiResult<()>;

    async fn list_nurses(&self) -> ApiResult<Vec<Nurse>>;
    async fn get_nurse(&self, id: i32) -> ApiResult<Nurse>;
    async fn create_nurse(&self, nurse: NurseDto) -> ApiResult<Nurse>;
    async fn update_nurse(&self, id: i32, nurse: NurseDto) -> ApiResult<Nurse>;
    async fn delete_nurse(&self, id: i32) -> ApiResult<()>;

    async fn specialties(&self) -> ApiResult<Vec<CatalogItem>>;
    async fn doctor_catalog(&self) -> ApiResult<Vec<CatalogItem>>;

    /// The backend returns a list; the first recorded entry wins. Absence is
    /// not an error — an appointment may simply have no vitals yet.
    async fn vitals_by_appointment(&self, appointment_id: i32) -> ApiResult<Option<VitalSigns>>;
    async fn create_vital_signs(&self, vitals: VitalSignsDto) -> ApiResult<VitalSigns>;
    async fn update_vital_signs(&self, id: i32, vitals: VitalSignsDto) -> ApiResult<VitalSigns>;

    async fn history_by_patient(&self, patient_id: i32) -> ApiResult<Option<MedicalHistory>>;
    async fn create_medical_history(
        &self,
        history: MedicalHistoryDto,
    ) -> ApiResult<MedicalHistory>;
    async fn update_medical_history(
        &self,
        patient_id: i32,
        history: MedicalHistoryDto,
    ) -> ApiResult<MedicalHistory>;

    async fn consultation_by_appointment(
        &self,
        appointment_id: i32,
    ) -> ApiResult<Option<MedicalConsultation>>;
    async fn create_consultation(
        &self,
        consultation: MedicalConsultationDto,
    ) -> ApiResult<MedicalConsultation>;
}
