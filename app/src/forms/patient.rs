// app/src/forms/patient.rs

use models::{EmergencyContact, EmergencyContactDto, Patient, PatientDto};

use crate::forms::engine::{FieldSpec, Form, FormError, FormMode, Rule};

const GENDERS: &[&str] = &["MALE", "FEMALE", "OTHER"];

fn patient_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("name", "Nombre").rule(Rule::Required("El nombre es requerido")),
        FieldSpec::new("lastName", "Apellido").rule(Rule::Required("El apellido es requerido")),
        FieldSpec::new("birthDate", "Fecha de nacimiento")
            .rule(Rule::Required("La fecha de nacimiento es requerida"))
            .rule(Rule::Date("Fecha inválida")),
        FieldSpec::new("gender", "Género")
            .rule(Rule::Required("El género es requerido"))
            .rule(Rule::OneOf(GENDERS, "Género inválido")),
        FieldSpec::new("phone", "Teléfono").rule(Rule::Required("El teléfono es requerido")),
        FieldSpec::new("email", "Email")
            .rule(Rule::Required("El email es requerido"))
            .rule(Rule::Email("Email inválido")),
        FieldSpec::new("address", "Dirección").rule(Rule::Required("La dirección es requerida")),
        FieldSpec::new("isActive", "Activo"),
    ]
}

pub struct PatientForm {
    pub form: Form,
}

impl PatientForm {
    pub fn new() -> Self {
        let mut form = Form::new(patient_fields(), FormMode::Create);
        form.seed("isActive", "true");
        PatientForm { form }
    }

    pub fn edit(patient: &Patient) -> Self {
        let mut form = Form::new(patient_fields(), FormMode::Edit);
        form.seed("name", patient.name.clone());
        form.seed("lastName", patient.last_name.clone());
        form.seed("birthDate", patient.birth_date.to_string());
        form.seed("gender", patient.gender.to_string());
        form.seed("phone", patient.phone.clone());
        form.seed("email", patient.email.clone());
        form.seed("address", patient.address.clone());
        form.seed("isActive", patient.is_active.to_string());
        PatientForm { form }
    }

    pub fn payload(&self) -> Result<PatientDto, FormError> {
        self.form.ensure_submittable()?;
        Ok(PatientDto {
            name: self.form.text("name"),
            last_name: self.form.text("lastName"),
            birth_date: self.form.date_value("birthDate")?,
            gender: self.form.text("gender").parse().map_err(|_| FormError::Invalid)?,
            phone: self.form.text("phone"),
            email: self.form.text("email"),
            address: self.form.text("address"),
            is_active: self.form.bool_value("isActive"),
        })
    }
}

impl Default for PatientForm {
    fn default() -> Self {
        PatientForm::new()
    }
}

fn contact_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("name", "Nombre").rule(Rule::Required("El nombre es requerido")),
        FieldSpec::new("lastName", "Apellido").rule(Rule::Required("El apellido es requerido")),
        FieldSpec::new("phone", "Teléfono").rule(Rule::Required("El teléfono es requerido")),
        FieldSpec::new("email", "Email")
            .rule(Rule::Required("El email es requerido"))
            .rule(Rule::Email("Email inválido")),
        FieldSpec::new("address", "Dirección").rule(Rule::Required("La dirección es requerida")),
    ]
}

/// Emergency contact for one patient; the owning patient id is fixed at
/// construction, never edited.
pub struct EmergencyContactForm {
    pub form: Form,
    patient_id: i32,
}

impl EmergencyContactForm {
    pub fn new(patient_id: i32) -> Self {
        EmergencyContactForm {
            form: Form::new(contact_fields(), FormMode::Create),
            patient_id,
        }
    }

    pub fn edit(contact: &EmergencyContact) -> Self {
        let mut form = Form::new(contact_fields(), FormMode::Edit);
        form.seed("name", contact.name.clone());
        form.seed("lastName", contact.last_name.clone());
        form.seed("phone", contact.phone.clone());
        form.seed("email", contact.email.clone());
        form.seed("address", contact.address.clone());
        EmergencyContactForm { form, patient_id: contact.patient_id }
    }

    pub fn payload(&self) -> Result<EmergencyContactDto, FormError> {
        self.form.ensure_submittable()?;
        Ok(EmergencyContactDto {
            name: self.form.text("name"),
            last_name: self.form.text("lastName"),
            phone: self.form.text("phone"),
            email: self.form.text("email"),
            address: self.form.text("address"),
            patient_id: self.patient_id,
        })
    }
}
