// app/src/pages/fake.rs
//
// In-memory ClinicApi used by page tests: entity stores behind a mutex, a
// per-method call counter, and per-method failure injection.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use client::{ApiError, ApiResult, ClinicApi, LoginRequest};
use models::{
    Appointment, AppointmentDto, AppointmentStatus, CatalogItem, Doctor, DoctorDto,
    EmergencyContact, EmergencyContactDto, MedicalConsultation, MedicalConsultationDto,
    MedicalHistory, MedicalHistoryDto, Nurse, NurseDto, Patient, PatientDto, VitalSigns,
    VitalSignsDto,
};

#[derive(Default)]
struct Inner {
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
    doctors: Vec<Doctor>,
    nurses: Vec<Nurse>,
    vitals: Vec<VitalSigns>,
    histories: Vec<MedicalHistory>,
    consultations: Vec<MedicalConsultation>,
    next_id: i32,
    calls: HashMap<&'static str, usize>,
    failing: HashSet<&'static str>,
}

#[derive(Default)]
pub struct FakeApi {
    inner: Mutex<Inner>,
}

impl FakeApi {
    pub fn new() -> Self {
        let fake = FakeApi::default();
        fake.inner.lock().unwrap().next_id = 100;
        fake
    }

    pub fn calls(&self, method: &str) -> usize {
        *self.inner.lock().unwrap().calls.get(method).unwrap_or(&0)
    }

    /// Makes every future call to `method` fail with a rejected envelope.
    pub fn fail(&self, method: &'static str) {
        self.inner.lock().unwrap().failing.insert(method);
    }

    pub fn seed_patient(&self, patient: Patient) {
        self.inner.lock().unwrap().patients.push(patient);
    }

    pub fn seed_appointment(&self, appointment: Appointment) {
        self.inner.lock().unwrap().appointments.push(appointment);
    }

    pub fn seed_doctor(&self, doctor: Doctor) {
        self.inner.lock().unwrap().doctors.push(doctor);
    }

    pub fn seed_nurse(&self, nurse: Nurse) {
        self.inner.lock().unwrap().nurses.push(nurse);
    }

    pub fn seed_vitals(&self, vitals: VitalSigns) {
        self.inner.lock().unwrap().vitals.push(vitals);
    }

    pub fn appointment_status(&self, id: i32) -> Option<AppointmentStatus> {
        self.inner
            .lock()
            .unwrap()
            .appointments
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.status)
    }

    pub fn consultation_count(&self) -> usize {
        self.inner.lock().unwrap().consultations.len()
    }

    fn track(&self, method: &'static str) -> ApiResult<()> {
        let mut inner = self.inner.lock().unwrap();
        *inner.calls.entry(method).or_insert(0) += 1;
        if inner.failing.contains(method) {
            Err(ApiError::rejected("fallo simulado"))
        } else {
            Ok(())
        }
    }

    fn fresh_id(&self) -> i32 {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        inner.next_id
    }
}

pub fn patient_from_dto(id: i32, dto: &PatientDto) -> Patient {
    Patient {
        id,
        name: dto.name.clone(),
        last_name: dto.last_name.clone(),
        birth_date: dto.birth_date,
        gender: dto.gender,
        phone: dto.phone.clone(),
        email: dto.email.clone(),
        address: dto.address.clone(),
        is_active: dto.is_active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        emergency_contact: None,
        appointments: None,
    }
}

pub fn appointment_from_dto(id: i32, dto: &AppointmentDto) -> Appointment {
    Appointment {
        id,
        date: dto.date,
        time: dto.time.clone(),
        doctor_id: dto.doctor_id,
        patient_id: dto.patient_id,
        specialty: dto.specialty.clone(),
        status: dto.status,
        reason: dto.reason.clone(),
        patient: None,
        doctor: None,
    }
}

pub fn doctor_from_dto(id: i32, dto: &DoctorDto) -> Doctor {
    Doctor {
        id,
        user_id: id + 1000,
        name: dto.name.clone(),
        last_name: dto.last_name.clone(),
        email: dto.email.clone(),
        license_number: dto.license_number.clone(),
        specialty: dto.specialty.clone(),
        sub_specialty: dto.sub_specialty.clone(),
        phone: dto.phone.clone(),
        office_phone: dto.office_phone.clone(),
    }
}

pub fn nurse_from_dto(id: i32, dto: &NurseDto) -> Nurse {
    Nurse {
        id,
        user_id: id + 1000,
        name: dto.name.clone(),
        last_name: dto.last_name.clone(),
        email: dto.email.clone(),
        phone: dto.phone.clone(),
        license: dto.license.clone(),
        office_phone: dto.office_phone.clone(),
    }
}

#[async_trait]
impl ClinicApi for FakeApi {
    async fn login(&self, _credentials: LoginRequest) -> ApiResult<String> {
        self.track("login")?;
        Ok("fake-token".to_string())
    }

    async fn list_patients(&self) -> ApiResult<Vec<Patient>> {
        self.track("list_patients")?;
        Ok(self.inner.lock().unwrap().patients.clone())
    }

    async fn get_patient(&self, id: i32) -> ApiResult<Patient> {
        self.track("get_patient")?;
        self.inner
            .lock()
            .unwrap()
            .patients
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ApiError::rejected("paciente no encontrado"))
    }

    async fn create_patient(&self, patient: PatientDto) -> ApiResult<Patient> {
        self.track("create_patient")?;
        let created = patient_from_dto(self.fresh_id(), &patient);
        self.inner.lock().unwrap().patients.push(created.clone());
        Ok(created)
    }

    async fn update_patient(&self, id: i32, patient: PatientDto) -> ApiResult<Patient> {
        self.track("update_patient")?;
        let mut inner = self.inner.lock().unwrap();
        let slot = inner
            .patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::rejected("paciente no encontrado"))?;
        *slot = patient_from_dto(id, &patient);
        Ok(slot.clone())
    }

    async fn delete_patient(&self, id: i32) -> ApiResult<()> {
        self.track("delete_patient")?;
        self.inner.lock().unwrap().patients.retain(|p| p.id != id);
        Ok(())
    }

    async fn create_emergency_contact(
        &self,
        contact: EmergencyContactDto,
    ) -> ApiResult<EmergencyContact> {
        self.track("create_emergency_contact")?;
        let created = EmergencyContact {
            id: Some(self.fresh_id()),
            name: contact.name,
            last_name: contact.last_name,
            phone: contact.phone,
            email: contact.email,
            address: contact.address,
            patient_id: contact.patient_id,
        };
        let mut inner = self.inner.lock().unwrap();
        if let Some(p) = inner.patients.iter_mut().find(|p| p.id == created.patient_id) {
            p.emergency_contact = Some(created.clone());
        }
        Ok(created)
    }

    async fn update_emergency_contact(
        &self,
        id: i32,
        contact: EmergencyContactDto,
    ) -> ApiResult<EmergencyContact> {
        self.track("update_emergency_contact")?;
        let updated = EmergencyContact {
            id: Some(id),
            name: contact.name,
            last_name: contact.last_name,
            phone: contact.phone,
            email: contact.email,
            address: contact.address,
            patient_id: contact.patient_id,
        };
        let mut inner = self.inner.lock().unwrap();
        if let Some(p) = inner.patients.iter_mut().find(|p| p.id == updated.patient_id) {
            p.emergency_contact = Some(updated.clone());
        }
        Ok(updated)
    }

    async fn list_appointments(&self) -> ApiResult<Vec<Appointment>> {
        self.track("list_appointments")?;
        Ok(self.inner.lock().unwrap().appointments.clone())
    }

    async fn get_appointment(&self, id: i32) -> ApiResult<Appointment> {
        self.track("get_appointment")?;
        self.inner
            .lock()
            .unwrap()
            .appointments
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| ApiError::rejected("cita no encontrada"))
    }

    async fn appointments_by_patient(&self, patient_id: i32) -> ApiResult<Vec<Appointment>> {
        self.track("appointments_by_patient")?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn create_appointment(&self, appointment: AppointmentDto) -> ApiResult<Appointment> {
        self.track("create_appointment")?;
        let created = appointment_from_dto(self.fresh_id(), &appointment);
        self.inner.lock().unwrap().appointments.push(created.clone());
        Ok(created)
    }

    async fn update_appointment(
        &self,
        id: i32,
        appointment: AppointmentDto,
    ) -> ApiResult<Appointment> {
        self.track("update_appointment")?;
        let mut inner = self.inner.lock().unwrap();
        let slot = inner
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ApiError::rejected("cita no encontrada"))?;
        *slot = appointment_from_dto(id, &appointment);
        Ok(slot.clone())
    }

    async fn delete_appointment(&self, id: i32) -> ApiResult<()> {
        self.track("delete_appointment")?;
        self.inner.lock().unwrap().appointments.retain(|a| a.id != id);
        Ok(())
    }

    async fn list_doctors(&self) -> ApiResult<Vec<Doctor>> {
        self.track("list_doctors")?;
        Ok(self.inner.lock().unwrap().doctors.clone())
    }

    async fn get_doctor(&self, id: i32) -> ApiResult<Doctor> {
        self.track("get_doctor")?;
        self.inner
            .lock()
            .unwrap()
            .doctors
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| ApiError::rejected("doctor no encontrado"))
    }

    async fn create_doctor(&self, doctor: DoctorDto) -> ApiResult<Doctor> {
        self.track("create_doctor")?;
        let created = doctor_from_dto(self.fresh_id(), &doctor);
        self.inner.lock().unwrap().doctors.push(created.clone());
        Ok(created)
    }

    async fn update_doctor(&self, id: i32, doctor: DoctorDto) -> ApiResult<Doctor> {
        self.track("update_doctor")?;
        let mut inner = self.inner.lock().unwrap();
        let slot = inner
            .doctors
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ApiError::rejected("doctor no encontrado"))?;
        *slot = doctor_from_dto(id, &doctor);
        Ok(slot.clone())
    }

    async fn delete_doctor(&self, id: i32) -> ApiResult<()> {
        self.track("delete_doctor")?;
        self.inner.lock().unwrap().doctors.retain(|d| d.id != id);
        Ok(())
    }

    async fn list_nurses(&self) -> ApiResult<Vec<Nurse>> {
        self.track("list_nurses")?;
        Ok(self.inner.lock().unwrap().nurses.clone())
    }

    async fn get_nurse(&self, id: i32) -> ApiResult<Nurse> {
        self.track("get_nurse")?;
        self.inner
            .lock()
            .unwrap()
            .nurses
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| ApiError::rejected("enfermera no encontrada"))
    }

    async fn create_nurse(&self, nurse: NurseDto) -> ApiResult<Nurse> {
        self.track("create_nurse")?;
        let created = nurse_from_dto(self.fresh_id(), &nurse);
        self.inner.lock().unwrap().nurses.push(created.clone());
        Ok(created)
    }

    async fn update_nurse(&self, id: i32, nurse: NurseDto) -> ApiResult<Nurse> {
        self.track("update_nurse")?;
        let mut inner = self.inner.lock().unwrap();
        let slot = inner
            .nurses
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| ApiError::rejected("enfermera no encontrada"))?;
        *slot = nurse_from_dto(id, &nurse);
        Ok(slot.clone())
    }

    async fn delete_nurse(&self, id: i32) -> ApiResult<()> {
        self.track("delete_nurse")?;
        self.inner.lock().unwrap().nurses.retain(|n| n.id != id);
        Ok(())
    }

    async fn specialties(&self) -> ApiResult<Vec<CatalogItem>> {
        self.track("specialties")?;
        Ok(vec![
            CatalogItem { id: "GENERAL".into(), name: "Medicina General".into() },
            CatalogItem { id: "CARDIOLOGY".into(), name: "Cardiología".into() },
        ])
    }

    async fn doctor_catalog(&self) -> ApiResult<Vec<CatalogItem>> {
        self.track("doctor_catalog")?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .doctors
            .iter()
            .map(|d| CatalogItem { id: d.id.to_string(), name: d.full_name() })
            .collect())
    }

    async fn vitals_by_appointment(&self, appointment_id: i32) -> ApiResult<Option<VitalSigns>> {
        self.track("vitals_by_appointment")?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .vitals
            .iter()
            .find(|v| v.appointment_id == appointment_id)
            .cloned())
    }

    async fn create_vital_signs(&self, vitals: VitalSignsDto) -> ApiResult<VitalSigns> {
        self.track("create_vital_signs")?;
        let created = VitalSigns {
            id: Some(self.fresh_id()),
            appointment_id: vitals.appointment_id,
            temperature: vitals.temperature,
            heart_rate: vitals.heart_rate,
            blood_pressure: vitals.blood_pressure,
            oxygen_saturation: vitals.oxygen_saturation,
            respiratory_rate: vitals.respiratory_rate,
            weight: vitals.weight,
            height: vitals.height,
            bmi: Some(models::derived::bmi(vitals.weight, vitals.height)),
            created_at: None,
        };
        self.inner.lock().unwrap().vitals.push(created.clone());
        Ok(created)
    }

    async fn update_vital_signs(&self, id: i32, vitals: VitalSignsDto) -> ApiResult<VitalSigns> {
        self.track("update_vital_signs")?;
        let mut inner = self.inner.lock().unwrap();
        let slot = inner
            .vitals
            .iter_mut()
            .find(|v| v.id == Some(id))
            .ok_or_else(|| ApiError::rejected("signos vitales no encontrados"))?;
        slot.temperature = vitals.temperature;
        slot.heart_rate = vitals.heart_rate;
        slot.blood_pressure = vitals.blood_pressure;
        slot.oxygen_saturation = vitals.oxygen_saturation;
        slot.respiratory_rate = vitals.respiratory_rate;
        slot.weight = vitals.weight;
        slot.height = vitals.height;
        slot.bmi = Some(models::derived::bmi(vitals.weight, vitals.height));
        Ok(slot.clone())
    }

    async fn history_by_patient(&self, patient_id: i32) -> ApiResult<Option<MedicalHistory>> {
        self.track("history_by_patient")?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .histories
            .iter()
            .find(|h| h.patient_id == patient_id)
            .cloned())
    }

    async fn create_medical_history(
        &self,
        history: MedicalHistoryDto,
    ) -> ApiResult<MedicalHistory> {
        self.track("create_medical_history")?;
        let created = MedicalHistory {
            id: Some(self.fresh_id()),
            patient_id: history.patient_id,
            allergies: history.allergies,
            medications: history.medications,
            surgeries: history.surgeries,
            family_history: history.family_history,
            chronic_conditions: history.chronic_conditions,
            gestational_history: history.gestational_history,
            reproductive_history: history.reproductive_history,
            updated_at: None,
        };
        self.inner.lock().unwrap().histories.push(created.clone());
        Ok(created)
    }

    async fn update_medical_history(
        &self,
        patient_id: i32,
        history: MedicalHistoryDto,
    ) -> ApiResult<MedicalHistory> {
        self.track("update_medical_history")?;
        let mut inner = self.inner.lock().unwrap();
        let slot = inner
            .histories
            .iter_mut()
            .find(|h| h.patient_id == patient_id)
            .ok_or_else(|| ApiError::rejected("historial no encontrado"))?;
        slot.allergies = history.allergies;
        slot.medications = history.medications;
        slot.surgeries = history.surgeries;
        slot.family_history = history.family_history;
        slot.chronic_conditions = history.chronic_conditions;
        slot.gestational_history = history.gestational_history;
        slot.reproductive_history = history.reproductive_history;
        Ok(slot.clone())
    }

    async fn consultation_by_appointment(
        &self,
        appointment_id: i32,
    ) -> ApiResult<Option<MedicalConsultation>> {
        self.track("consultation_by_appointment")?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .consultations
            .iter()
            .find(|c| c.appointment_id == appointment_id)
            .cloned())
    }

    async fn create_consultation(
        &self,
        consultation: MedicalConsultationDto,
    ) -> ApiResult<MedicalConsultation> {
        self.track("create_consultation")?;
        let created = MedicalConsultation {
            id: Some(self.fresh_id()),
            patient_id: consultation.patient_id,
            doctor_id: consultation.doctor_id,
            appointment_id: consultation.appointment_id,
            symptoms: consultation.symptoms,
            physical_exam: consultation.physical_exam,
            diagnosis: consultation.diagnosis,
            treatment: consultation.treatment,
            recommendations: consultation.recommendations,
            follow_up: consultation.follow_up,
            notes: consultation.notes,
            created_at: None,
            updated_at: None,
        };
        self.inner.lock().unwrap().consultations.push(created.clone());
        Ok(created)
    }
}

/// Builders shared by the page tests.
pub mod samples {
    use super::*;
    use chrono::NaiveDate;
    use models::Gender;

    pub fn patient(id: i32, name: &str, last_name: &str) -> Patient {
        Patient {
            id,
            name: name.into(),
            last_name: last_name.into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            gender: Gender::Female,
            phone: "555-0101".into(),
            email: format!("{}@x.com", name.to_lowercase()),
            address: "Calle 1".into(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            emergency_contact: None,
            appointments: None,
        }
    }

    pub fn appointment(id: i32, patient_id: i32, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            time: "02:30 PM".into(),
            doctor_id: 2,
            patient_id,
            specialty: "GENERAL".into(),
            status,
            reason: "Control".into(),
            patient: None,
            doctor: None,
        }
    }

    pub fn doctor(id: i32, name: &str, last_name: &str) -> Doctor {
        Doctor {
            id,
            user_id: id + 1000,
            name: name.into(),
            last_name: last_name.into(),
            email: format!("{}@clinic.mx", name.to_lowercase()),
            license_number: format!("CED-{:04}", id),
            specialty: "GENERAL".into(),
            sub_specialty: None,
            phone: "555-0404".into(),
            office_phone: None,
        }
    }

    pub fn nurse(id: i32, name: &str, last_name: &str) -> Nurse {
        Nurse {
            id,
            user_id: id + 1000,
            name: name.into(),
            last_name: last_name.into(),
            email: format!("{}@clinic.mx", name.to_lowercase()),
            phone: "555-0123".into(),
            license: None,
            office_phone: None,
        }
    }

    pub fn vitals(appointment_id: i32) -> VitalSigns {
        VitalSigns {
            id: Some(900),
            appointment_id,
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
}
