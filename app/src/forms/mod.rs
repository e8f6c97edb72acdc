// app/src/forms/mod.rs

pub mod appointment;
pub mod engine;
pub mod login;
pub mod patient;
pub mod records;
pub mod staff;

pub use appointment::AppointmentForm;
pub use engine::{FieldSpec, Form, FormError, FormMode, Rule};
pub use login::LoginForm;
pub use patient::{EmergencyContactForm, PatientForm};
pub use records::{ConsultationForm, MedicalHistoryForm, VitalSignsForm};
pub use staff::{DoctorForm, NurseForm};
