// app/src/forms/login.rs

use client::LoginRequest;

use crate::forms::engine::{FieldSpec, Form, FormError, FormMode, Rule};

pub struct LoginForm {
    pub form: Form,
}

impl LoginForm {
    pub fn new() -> Self {
        let form = Form::new(
            vec![
                FieldSpec::new("email", "Correo electrónico")
                    .rule(Rule::Required("El correo electrónico es requerido"))
                    .rule(Rule::Email("Email inválido")),
                FieldSpec::new("password", "Contraseña")
                    .rule(Rule::Required("La contraseña es requerida")),
            ],
            FormMode::Create,
        );
        LoginForm { form }
    }

    pub fn payload(&self) -> Result<LoginRequest, FormError> {
        self.form.ensure_submittable()?;
        Ok(LoginRequest {
            email: self.form.text("email"),
            password: self.form.value("password").to_string(),
        })
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        LoginForm::new()
    }
}
