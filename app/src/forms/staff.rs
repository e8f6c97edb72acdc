// app/src/forms/staff.rs
//
// Doctor and nurse registration is a two-step form: personal and professional
// data first, then the login credentials. Editing an existing record shows
// everything in one layout and drops the password requirement.

use models::{Doctor, DoctorDto, Nurse, NurseDto};

use crate::forms::engine::{FieldSpec, Form, FormError, FormMode, Rule};

fn doctor_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("name", "Nombre").rule(Rule::Required("El nombre es requerido")),
        FieldSpec::new("lastName", "Apellido").rule(Rule::Required("El apellido es requerido")),
        FieldSpec::new("licenseNumber", "Cédula profesional")
            .rule(Rule::Required("La cédula profesional es requerida")),
        FieldSpec::new("specialty", "Especialidad")
            .rule(Rule::Required("La especialidad es requerida")),
        FieldSpec::new("subSpecialty", "Subespecialidad"),
        FieldSpec::new("phone", "Teléfono móvil")
            .rule(Rule::Required("El teléfono móvil es requerido")),
        FieldSpec::new("officePhone", "Teléfono de consultorio"),
        FieldSpec::new("email", "Email")
            .step(1)
            .rule(Rule::Required("El email es requerido"))
            .rule(Rule::Email("Email inválido")),
        FieldSpec::new("password", "Contraseña")
            .step(1)
            .rule(Rule::RequiredOnCreate("La contraseña es requerida"))
            .rule(Rule::MinLen(6, "Mínimo 6 caracteres")),
    ]
}

pub struct DoctorForm {
    pub form: Form,
}

impl DoctorForm {
    pub fn new() -> Self {
        DoctorForm { form: Form::new(doctor_fields(), FormMode::Create) }
    }

    pub fn edit(doctor: &Doctor) -> Self {
        let mut form = Form::new(doctor_fields(), FormMode::Edit);
        form.seed("name", doctor.name.clone());
        form.seed("lastName", doctor.last_name.clone());
        form.seed("licenseNumber", doctor.license_number.clone());
        form.seed("specialty", doctor.specialty.clone());
        form.seed("subSpecialty", doctor.sub_specialty.clone().unwrap_or_default());
        form.seed("phone", doctor.phone.clone());
        form.seed("officePhone", doctor.office_phone.clone().unwrap_or_default());
        form.seed("email", doctor.email.clone());
        DoctorForm { form }
    }

    pub fn payload(&self) -> Result<DoctorDto, FormError> {
        self.form.ensure_submittable()?;
        Ok(DoctorDto {
            name: self.form.text("name"),
            last_name: self.form.text("lastName"),
            email: self.form.text("email"),
            license_number: self.form.text("licenseNumber"),
            specialty: self.form.text("specialty"),
            sub_specialty: self.form.opt_text("subSpecialty"),
            phone: self.form.text("phone"),
            office_phone: self.form.opt_text("officePhone"),
            password: self.form.opt_text("password"),
        })
    }
}

impl Default for DoctorForm {
    fn default() -> Self {
        DoctorForm::new()
    }
}

fn nurse_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("name", "Nombre").rule(Rule::Required("El nombre es requerido")),
        FieldSpec::new("lastName", "Apellido").rule(Rule::Required("El apellido es requerido")),
        FieldSpec::new("phone", "Teléfono").rule(Rule::Required("El teléfono es requerido")),
        FieldSpec::new("license", "Cédula"),
        FieldSpec::new("officePhone", "Teléfono de consultorio"),
        FieldSpec::new("email", "Email")
            .step(1)
            .rule(Rule::Required("El email es requerido"))
            .rule(Rule::Email("Email inválido")),
        FieldSpec::new("password", "Contraseña")
            .step(1)
            .rule(Rule::RequiredOnCreate("La contraseña es requerida"))
            .rule(Rule::MinLen(6, "Mínimo 6 caracteres")),
    ]
}

pub struct NurseForm {
    pub form: Form,
}

impl NurseForm {
    pub fn new() -> Self {
        NurseForm { form: Form::new(nurse_fields(), FormMode::Create) }
    }

    pub fn edit(nurse: &Nurse) -> Self {
        let mut form = Form::new(nurse_fields(), FormMode::Edit);
        form.seed("name", nurse.name.clone());
        form.seed("lastName", nurse.last_name.clone());
        form.seed("phone", nurse.phone.clone());
        form.seed("license", nurse.license.clone().unwrap_or_default());
        form.seed("officePhone", nurse.office_phone.clone().unwrap_or_default());
        form.seed("email", nurse.email.clone());
        NurseForm { form }
    }

    pub fn payload(&self) -> Result<NurseDto, FormError> {
        self.form.ensure_submittable()?;
        Ok(NurseDto {
            name: self.form.text("name"),
            last_name: self.form.text("lastName"),
            email: self.form.text("email"),
            phone: self.form.text("phone"),
            license: self.form.opt_text("license"),
            office_phone: self.form.opt_text("officePhone"),
            password: self.form.opt_text("password"),
        })
    }
}

impl Default for NurseForm {
    fn default() -> Self {
        NurseForm::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_walks_two_steps() {
        let mut f = DoctorForm::new();
        f.form.set("name", "Laura");
        f.form.set("lastName", "Silva");
        f.form.set("licenseNumber", "CED-1234");
        f.form.set("specialty", "CARDIOLOGY");
        f.form.set("phone", "555-0404");
        assert!(!f.form.can_submit());
        assert!(f.form.advance());

        f.form.set("email", "laura@clinic.mx");
        f.form.set("password", "secret1");
        let dto = f.payload().unwrap();
        assert_eq!(dto.password.as_deref(), Some("secret1"));
        assert!(dto.sub_specialty.is_none());
    }

    #[test]
    fn step_one_blocks_until_its_fields_pass() {
        let mut f = NurseForm::new();
        f.form.set("name", "Eva");
        assert!(!f.form.advance());
        f.form.set("lastName", "Marin");
        f.form.set("phone", "555-0123");
        assert!(f.form.advance());
    }

    #[test]
    fn editing_needs_no_password_and_omits_it() {
        let nurse = Nurse {
            id: 2,
            user_id: 11,
            name: "Eva".into(),
            last_name: "Marin".into(),
            email: "eva@clinic.mx".into(),
            phone: "555-0123".into(),
            license: None,
            office_phone: Some("555-9999".into()),
        };
        let f = NurseForm::edit(&nurse);
        assert!(f.form.can_submit());
        let dto = f.payload().unwrap();
        assert!(dto.password.is_none());
        assert_eq!(dto.office_phone.as_deref(), Some("555-9999"));
    }
}
