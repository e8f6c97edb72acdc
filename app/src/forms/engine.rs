// app/src/forms/engine.rs
//
// Schema-declared form state: every field carries its validation rules, the
// form tracks values and touched flags, and submission is gated on all rules
// passing. Multi-step forms are an explicit state machine over ordered steps.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// One validation rule. Format rules pass on empty input; pairing them with
/// `Required` is what makes a field mandatory, the way the original schemas
/// compose `required()` with format checks.
#[derive(Debug, Clone)]
pub enum Rule {
    Required(&'static str),
    /// Required only when the form is in create mode (e.g. password).
    RequiredOnCreate(&'static str),
    Email(&'static str),
    MinLen(usize, &'static str),
    Number { min: f64, max: f64 },
    Integer { min: i64, max: i64 },
    OneOf(&'static [&'static str], &'static str),
    Date(&'static str),
    Time(&'static str),
}

impl Rule {
    fn check(&self, value: &str, mode: FormMode) -> Option<String> {
        let value = value.trim();
        match self {
            Rule::Required(msg) => value.is_empty().then(|| (*msg).to_string()),
            Rule::RequiredOnCreate(msg) => {
                (mode == FormMode::Create && value.is_empty()).then(|| (*msg).to_string())
            }
            Rule::Email(msg) => {
                (!value.is_empty() && !EMAIL_RE.is_match(value)).then(|| (*msg).to_string())
            }
            Rule::MinLen(n, msg) => {
                (!value.is_empty() && value.chars().count() < *n).then(|| (*msg).to_string())
            }
            Rule::Number { min, max } => {
                if value.is_empty() {
                    return None;
                }
                match value.parse::<f64>() {
                    Ok(n) if n >= *min && n <= *max => None,
                    Ok(_) => Some(format!("Debe estar entre {} y {}", min, max)),
                    Err(_) => Some("Debe ser un número".to_string()),
                }
            }
            Rule::Integer { min, max } => {
                if value.is_empty() {
                    return None;
                }
                match value.parse::<i64>() {
                    Ok(n) if n >= *min && n <= *max => None,
                    Ok(_) => Some(format!("Debe estar entre {} y {}", min, max)),
                    Err(_) => Some("Debe ser un número entero".to_string()),
                }
            }
            Rule::OneOf(options, msg) => {
                (!value.is_empty() && !options.contains(&value)).then(|| (*msg).to_string())
            }
            Rule::Date(msg) => (!value.is_empty()
                && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err())
            .then(|| (*msg).to_string()),
            Rule::Time(msg) => {
                (!value.is_empty() && models::derived::to_24h(value).is_err())
                    .then(|| (*msg).to_string())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    step: usize,
    rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        FieldSpec { name, label, step: 0, rules: Vec::new() }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("el formulario tiene errores de validación")]
    Invalid,

    #[error("el envío solo está disponible en el último paso")]
    NotOnFinalStep,
}

/// Controlled form state. Setting a value re-validates (validation is a pure
/// function of current values, so it runs on every change); blur marks a
/// field touched so its error becomes visible; submit is gated on the whole
/// schema passing.
pub struct Form {
    fields: Vec<FieldSpec>,
    values: HashMap<&'static str, String>,
    touched: HashSet<&'static str>,
    disabled: HashSet<&'static str>,
    mode: FormMode,
    step: usize,
}

impl Form {
    pub fn new(fields: Vec<FieldSpec>, mode: FormMode) -> Self {
        let values = fields.iter().map(|f| (f.name, String::new())).collect();
        Form {
            fields,
            values,
            touched: HashSet::new(),
            disabled: HashSet::new(),
            mode,
            step: 0,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Edit forms show every field in a single layout; only create forms walk
    /// the declared steps.
    fn effective_step(&self, field: &FieldSpec) -> usize {
        match self.mode {
            FormMode::Create => field.step,
            FormMode::Edit => 0,
        }
    }

    pub fn last_step(&self) -> usize {
        self.fields
            .iter()
            .map(|f| self.effective_step(f))
            .max()
            .unwrap_or(0)
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn is_final_step(&self) -> bool {
        self.step == self.last_step()
    }

    pub fn fields_in_current_step(&self) -> Vec<&FieldSpec> {
        self.fields
            .iter()
            .filter(|f| self.effective_step(f) == self.step)
            .collect()
    }

    /// Pre-populates a value without marking the field touched.
    pub fn seed(&mut self, name: &'static str, value: impl Into<String>) {
        if self.values.contains_key(name) {
            self.values.insert(name, value.into());
        }
    }

    /// Locks a field against edits (e.g. the attending doctor when the
    /// submitter is a doctor).
    pub fn disable(&mut self, name: &'static str) {
        self.disabled.insert(name);
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled.contains(name)
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        if self.disabled.contains(name) || !self.values.contains_key(name) {
            return;
        }
        self.values.insert(name, value.into());
        self.touched.insert(name);
    }

    pub fn blur(&mut self, name: &'static str) {
        if self.values.contains_key(name) {
            self.touched.insert(name);
        }
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// First failing rule for a field, touched or not.
    pub fn error(&self, name: &str) -> Option<String> {
        let field = self.fields.iter().find(|f| f.name == name)?;
        let value = self.value(name);
        field.rules.iter().find_map(|r| r.check(value, self.mode))
    }

    /// The error shown next to the input: only present once the field has
    /// been touched.
    pub fn visible_error(&self, name: &str) -> Option<String> {
        if self.touched.contains(name) {
            self.error(name)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|f| self.error(f.name).is_none())
    }

    fn step_is_valid(&self, step: usize) -> bool {
        self.fields
            .iter()
            .filter(|f| self.effective_step(f) == step)
            .all(|f| self.error(f.name).is_none())
    }

    /// Moves to the next step when every field in the current one passes.
    /// Returns whether the transition happened; failing fields are marked
    /// touched so their errors show.
    pub fn advance(&mut self) -> bool {
        if self.is_final_step() {
            return false;
        }
        if self.step_is_valid(self.step) {
            self.step += 1;
            true
        } else {
            let names: Vec<&'static str> = self
                .fields
                .iter()
                .filter(|f| self.effective_step(f) == self.step)
                .map(|f| f.name)
                .collect();
            self.touched.extend(names);
            false
        }
    }

    /// Going back never loses entered values.
    pub fn back(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    /// The submit control is only reachable on the final step, and only
    /// enabled while every declared rule passes.
    pub fn can_submit(&self) -> bool {
        self.is_final_step() && self.is_valid()
    }

    pub fn ensure_submittable(&self) -> Result<(), FormError> {
        if !self.is_final_step() {
            return Err(FormError::NotOnFinalStep);
        }
        if !self.is_valid() {
            return Err(FormError::Invalid);
        }
        Ok(())
    }

    // Typed readers used by payload builders after `ensure_submittable`.

    pub fn text(&self, name: &str) -> String {
        self.value(name).trim().to_string()
    }

    pub fn opt_text(&self, name: &str) -> Option<String> {
        let v = self.value(name).trim();
        if v.is_empty() { None } else { Some(v.to_string()) }
    }

    pub fn f64_value(&self, name: &str) -> Result<f64, FormError> {
        self.value(name).trim().parse().map_err(|_| FormError::Invalid)
    }

    pub fn i32_value(&self, name: &str) -> Result<i32, FormError> {
        self.value(name).trim().parse().map_err(|_| FormError::Invalid)
    }

    pub fn bool_value(&self, name: &str) -> bool {
        matches!(self.value(name).trim(), "true" | "TRUE" | "1" | "sí" | "si")
    }

    pub fn date_value(&self, name: &str) -> Result<NaiveDate, FormError> {
        NaiveDate::parse_from_str(self.value(name).trim(), "%Y-%m-%d")
            .map_err(|_| FormError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form(mode: FormMode) -> Form {
        Form::new(
            vec![
                FieldSpec::new("name", "Nombre").rule(Rule::Required("El nombre es requerido")),
                FieldSpec::new("email", "Email")
                    .rule(Rule::Required("El email es requerido"))
                    .rule(Rule::Email("Email inválido")),
                FieldSpec::new("password", "Contraseña")
                    .step(1)
                    .rule(Rule::RequiredOnCreate("La contraseña es requerida"))
                    .rule(Rule::MinLen(6, "Mínimo 6 caracteres")),
            ],
            mode,
        )
    }

    #[test]
    fn errors_stay_hidden_until_touched() {
        let mut form = sample_form(FormMode::Create);
        assert!(form.error("name").is_some());
        assert!(form.visible_error("name").is_none());
        form.blur("name");
        assert_eq!(form.visible_error("name").unwrap(), "El nombre es requerido");
    }

    #[test]
    fn setting_a_value_revalidates_and_touches() {
        let mut form = sample_form(FormMode::Create);
        form.set("email", "not-an-email");
        assert_eq!(form.visible_error("email").unwrap(), "Email inválido");
        form.set("email", "ana@clinic.mx");
        assert!(form.visible_error("email").is_none());
    }

    #[test]
    fn submit_is_gated_on_every_rule() {
        let mut form = sample_form(FormMode::Create);
        form.set("name", "Ana");
        form.set("email", "ana@clinic.mx");
        form.set("password", "secret1");
        assert!(!form.can_submit(), "still on step 0");
        assert!(form.advance());
        assert!(form.can_submit());
    }

    #[test]
    fn advancing_requires_the_current_step_to_pass() {
        let mut form = sample_form(FormMode::Create);
        form.set("name", "Ana");
        assert!(!form.advance(), "email still failing");
        assert_eq!(form.current_step(), 0);
        // The failed attempt surfaces the blocking error.
        assert!(form.visible_error("email").is_some());
        form.set("email", "ana@clinic.mx");
        assert!(form.advance());
        assert_eq!(form.current_step(), 1);
    }

    #[test]
    fn going_back_keeps_entered_values() {
        let mut form = sample_form(FormMode::Create);
        form.set("name", "Ana");
        form.set("email", "ana@clinic.mx");
        form.advance();
        form.set("password", "secret1");
        form.back();
        assert_eq!(form.value("password"), "secret1");
        assert_eq!(form.current_step(), 0);
    }

    #[test]
    fn edit_mode_collapses_steps_and_relaxes_create_only_rules() {
        let mut form = sample_form(FormMode::Edit);
        assert_eq!(form.last_step(), 0);
        form.set("name", "Ana");
        form.set("email", "ana@clinic.mx");
        // No password on edit.
        assert!(form.can_submit());
    }

    #[test]
    fn short_password_fails_even_on_edit() {
        let mut form = sample_form(FormMode::Edit);
        form.set("name", "Ana");
        form.set("email", "ana@clinic.mx");
        form.set("password", "abc");
        assert_eq!(form.error("password").unwrap(), "Mínimo 6 caracteres");
    }

    #[test]
    fn disabled_fields_ignore_edits() {
        let mut form = sample_form(FormMode::Create);
        form.seed("name", "Dra. Silva");
        form.disable("name");
        form.set("name", "otro");
        assert_eq!(form.value("name"), "Dra. Silva");
        assert!(form.is_disabled("name"));
    }

    #[test]
    fn numeric_rules_report_range_and_format() {
        let form_with = |v: &str| {
            let mut f = Form::new(
                vec![FieldSpec::new("temp", "Temperatura")
                    .rule(Rule::Required("Requerido"))
                    .rule(Rule::Number { min: 30.0, max: 45.0 })],
                FormMode::Create,
            );
            f.set("temp", v);
            f
        };
        assert!(form_with("36.5").is_valid());
        assert_eq!(form_with("50").error("temp").unwrap(), "Debe estar entre 30 y 45");
        assert_eq!(form_with("abc").error("temp").unwrap(), "Debe ser un número");
        assert_eq!(form_with("").error("temp").unwrap(), "Requerido");
    }

    #[test]
    fn date_and_time_rules_accept_wire_formats() {
        let mut f = Form::new(
            vec![
                FieldSpec::new("date", "Fecha").rule(Rule::Date("Fecha inválida")),
                FieldSpec::new("time", "Hora").rule(Rule::Time("Hora inválida")),
            ],
            FormMode::Create,
        );
        f.set("date", "2026-03-01");
        f.set("time", "14:30");
        assert!(f.is_valid());
        f.set("time", "02:30 PM");
        assert!(f.is_valid());
        f.set("date", "01/03/2026");
        assert!(!f.is_valid());
    }
}
