// models/src/lib.rs

pub mod appointment;
pub mod catalog;
pub mod derived;
pub mod errors;
pub mod patient;
pub mod records;
pub mod staff;

pub use appointment::{
    Appointment, AppointmentDto, AppointmentSpecialty, AppointmentStatus,
};
pub use catalog::CatalogItem;
pub use errors::ParseError;
pub use patient::{
    EmergencyContact, EmergencyContactDto, Gender, Patient, PatientAppointment, PatientDto,
};
pub use records::{
    MedicalConsultation, MedicalConsultationDto, MedicalHistory, MedicalHistoryDto,
    VitalSigns, VitalSignsDto,
};
pub use staff::{Doctor, DoctorDto, Nurse, NurseDto};
