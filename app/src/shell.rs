// app/src/shell.rs
//
// Interactive terminal driver over the page containers. The shell owns the
// active page, renders its table or cards after every command, and walks
// forms field by field. No business logic lives here; everything it does is
// a call into a page, a form, or the session store.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use crossterm::style::Stylize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use client::ClinicApi;
use security::SessionStore;

use crate::forms::{
    AppointmentForm, ConsultationForm, DoctorForm, EmergencyContactForm, Form, LoginForm,
    MedicalHistoryForm, NurseForm, PatientForm, VitalSignsForm,
};
use crate::nav::{breadcrumbs, sections};
use crate::pages::{
    AppointmentDetailPage, AppointmentsPage, ConsultationPage, DoctorDetailPage, DoctorsPage,
    NurseDetailPage, NursesPage, PatientDetailPage, PatientsPage, home_cards,
};
use crate::routes::{resolve, Route};
use crate::table::{DataTable, FilterValue, TableView};
use crate::toast::{ToastKind, ToastQueue};

/// One parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Go(String),
    Login,
    Logout,
    Sort(String),
    Filter(String, String),
    ClearFilter(String),
    Page(usize),
    Size(usize),
    New,
    Edit(i32),
    Delete(i32),
    Confirm(i32),
    Cancel(i32),
    Open(i32),
    Vitals,
    History,
    Contact,
    Finalize,
    Refresh,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(input: &str) -> Command {
    let parts: Vec<&str> = input.trim().split_whitespace().collect();
    let Some(head) = parts.first() else {
        return Command::Empty;
    };
    match (head.to_lowercase().as_str(), &parts[1..]) {
        ("go", [path]) => Command::Go((*path).to_string()),
        ("login", []) => Command::Login,
        ("logout", []) => Command::Logout,
        ("sort", [key]) => Command::Sort((*key).to_string()),
        ("filter", [key, rest @ ..]) if !rest.is_empty() => {
            Command::Filter((*key).to_string(), rest.join(" "))
        }
        ("filter", [key]) => Command::ClearFilter((*key).to_string()),
        ("page", [n]) => n.parse().map(Command::Page).unwrap_or_else(|_| unknown(input)),
        ("size", [n]) => n.parse().map(Command::Size).unwrap_or_else(|_| unknown(input)),
        ("new", []) => Command::New,
        ("edit", [id]) => n_arg(id, input, Command::Edit),
        ("delete", [id]) => n_arg(id, input, Command::Delete),
        ("confirm", [id]) => n_arg(id, input, Command::Confirm),
        ("cancel", [id]) => n_arg(id, input, Command::Cancel),
        ("open", [id]) => n_arg(id, input, Command::Open),
        ("vitals", []) => Command::Vitals,
        ("history", []) => Command::History,
        ("contact", []) => Command::Contact,
        ("finalize", []) => Command::Finalize,
        ("refresh", []) | ("r", []) => Command::Refresh,
        ("help", []) | ("?", []) => Command::Help,
        ("quit", []) | ("exit", []) | ("q", []) => Command::Quit,
        _ => unknown(input),
    }
}

fn n_arg(raw: &str, input: &str, make: impl Fn(i32) -> Command) -> Command {
    raw.parse().map(make).unwrap_or_else(|_| unknown(input))
}

fn unknown(input: &str) -> Command {
    Command::Unknown(input.trim().to_string())
}

enum ActivePage {
    None,
    Home,
    Patients(PatientsPage),
    PatientDetail(PatientDetailPage),
    Appointments(AppointmentsPage),
    AppointmentDetail(AppointmentDetailPage),
    Consultation(ConsultationPage),
    Doctors(DoctorsPage),
    DoctorDetail(DoctorDetailPage),
    Nurses(NursesPage),
    NurseDetail(NurseDetailPage),
}

pub struct Shell {
    api: Arc<dyn ClinicApi>,
    session: Arc<SessionStore>,
    toasts: Arc<ToastQueue>,
    route: Route,
    page: ActivePage,
    lines: Lines<BufReader<Stdin>>,
}

impl Shell {
    pub fn new(
        api: Arc<dyn ClinicApi>,
        session: Arc<SessionStore>,
        toasts: Arc<ToastQueue>,
    ) -> Self {
        let route = if session.is_authenticated() { Route::Home } else { Route::Login };
        Shell {
            api,
            session,
            toasts,
            route,
            page: ActivePage::None,
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "Gestión de clínica — escriba 'help' para los comandos".bold());
        self.navigate(self.route).await;
        loop {
            self.drain_toasts();
            self.render();
            print!("{} ", format!("clinic {}>", self.route).dark_cyan());
            io::stdout().flush()?;
            let Some(line) = self.lines.next_line().await? else {
                break; // stdin closed
            };
            match parse_command(&line) {
                Command::Quit => break,
                Command::Empty => {}
                cmd => self.dispatch(cmd).await,
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, cmd: Command) {
        match cmd {
            Command::Help => print_help(),
            Command::Go(path) => {
                let target = resolve(&path, self.session.is_authenticated());
                self.navigate(target).await;
            }
            Command::Login => self.login_flow().await,
            Command::Logout => {
                self.session.logout();
                self.toasts.info("Sesión cerrada");
                self.navigate(Route::Login).await;
            }
            Command::Refresh => self.navigate(self.route).await,
            Command::Sort(key) => self.on_table(|t| t.toggle_sort_owned(&key)),
            Command::Filter(key, value) => {
                self.on_table(|t| t.set_text_filter_owned(&key, value.clone()))
            }
            Command::ClearFilter(key) => self.on_table(|t| t.clear_filter_owned(&key)),
            Command::Page(n) => self.on_table(|t| t.set_page(n)),
            Command::Size(n) => self.on_table(|t| t.set_page_size(n)),
            Command::Unknown(input) => {
                println!("Comando desconocido: '{}'; 'help' muestra la lista", input)
            }
            cmd => self.page_command(cmd).await,
        }
    }

    async fn navigate(&mut self, route: Route) {
        let mut target = route;
        // A detail page whose primary fetch fails falls back to its list
        // page; the loop follows that chain instead of recursing.
        loop {
            let route = resolve(&target.path(), self.session.is_authenticated());
            self.route = route;
            let fallback = match route {
                Route::Login => {
                    self.page = ActivePage::None;
                    None
                }
                Route::Home => {
                    self.page = ActivePage::Home;
                    None
                }
                Route::Patients => {
                    let mut p = PatientsPage::new(self.api.clone(), self.toasts.clone());
                    p.load().await;
                    self.page = ActivePage::Patients(p);
                    None
                }
                Route::PatientDetail(id) => {
                    let mut p = PatientDetailPage::new(self.api.clone(), self.toasts.clone(), id);
                    let fb = p.load().await;
                    self.page = ActivePage::PatientDetail(p);
                    fb
                }
                Route::Appointments => {
                    let mut p = AppointmentsPage::new(self.api.clone(), self.toasts.clone());
                    p.load().await;
                    self.page = ActivePage::Appointments(p);
                    None
                }
                Route::AppointmentDetail(id) => {
                    let mut p =
                        AppointmentDetailPage::new(self.api.clone(), self.toasts.clone(), id);
                    let fb = p.load().await;
                    self.page = ActivePage::AppointmentDetail(p);
                    fb
                }
                Route::Consultation(id) => {
                    let mut p = ConsultationPage::new(self.api.clone(), self.toasts.clone(), id);
                    let fb = p.load().await;
                    self.page = ActivePage::Consultation(p);
                    fb
                }
                Route::Doctors => {
                    let mut p = DoctorsPage::new(self.api.clone(), self.toasts.clone());
                    p.load().await;
                    self.page = ActivePage::Doctors(p);
                    None
                }
                Route::DoctorDetail(id) => {
                    let mut p = DoctorDetailPage::new(self.api.clone(), self.toasts.clone(), id);
                    let fb = p.load().await;
                    self.page = ActivePage::DoctorDetail(p);
                    fb
                }
                Route::Nurses => {
                    let mut p = NursesPage::new(self.api.clone(), self.toasts.clone());
                    p.load().await;
                    self.page = ActivePage::Nurses(p);
                    None
                }
                Route::NurseDetail(id) => {
                    let mut p = NurseDetailPage::new(self.api.clone(), self.toasts.clone(), id);
                    let fb = p.load().await;
                    self.page = ActivePage::NurseDetail(p);
                    fb
                }
            };
            match fallback {
                Some(list_route) => target = list_route,
                None => break,
            }
        }
    }

    fn on_table(&mut self, apply: impl Fn(&mut dyn TableOps)) {
        match &mut self.page {
            ActivePage::Patients(p) => apply(&mut p.table),
            ActivePage::Appointments(p) => apply(&mut p.table),
            ActivePage::Doctors(p) => apply(&mut p.table),
            ActivePage::Nurses(p) => apply(&mut p.table),
            _ => println!("No hay tabla en esta página"),
        }
    }

    async fn page_command(&mut self, cmd: Command) {
        match self.route {
            Route::Patients => self.patients_command(cmd).await,
            Route::PatientDetail(_) => self.patient_detail_command(cmd).await,
            Route::Appointments => self.appointments_command(cmd).await,
            Route::AppointmentDetail(_) => self.appointment_detail_command(cmd).await,
            Route::Consultation(_) => self.consultation_command(cmd).await,
            Route::Doctors => self.doctors_command(cmd).await,
            Route::Nurses => self.nurses_command(cmd).await,
            _ => println!("Comando no disponible aquí; 'help' muestra la lista"),
        }
    }

    async fn patients_command(&mut self, cmd: Command) {
        match cmd {
            Command::New => {
                let mut form = PatientForm::new();
                if self.fill_form(&mut form.form).await {
                    if let (Ok(dto), ActivePage::Patients(p)) =
                        (form.payload(), &mut self.page)
                    {
                        p.create(dto).await;
                    }
                }
            }
            Command::Edit(id) => {
                let patient = match &self.page {
                    ActivePage::Patients(p) => {
                        p.patients.iter().find(|x| x.id == id).cloned()
                    }
                    _ => None,
                };
                let Some(patient) = patient else {
                    println!("Paciente {} no está en la lista", id);
                    return;
                };
                let mut form = PatientForm::edit(&patient);
                if self.fill_form(&mut form.form).await {
                    if let (Ok(dto), ActivePage::Patients(p)) =
                        (form.payload(), &mut self.page)
                    {
                        p.update(id, dto).await;
                    }
                }
            }
            Command::Delete(id) => {
                if let ActivePage::Patients(p) = &mut self.page {
                    p.request_delete(id);
                }
                if self.confirm_prompt("¿Eliminar el paciente?").await {
                    if let ActivePage::Patients(p) = &mut self.page {
                        p.confirm_delete().await;
                    }
                } else if let ActivePage::Patients(p) = &mut self.page {
                    p.cancel_delete();
                }
            }
            Command::Open(id) => self.navigate(Route::PatientDetail(id)).await,
            other => not_here(other),
        }
    }

    async fn patient_detail_command(&mut self, cmd: Command) {
        let patient_id = match self.route {
            Route::PatientDetail(id) => id,
            _ => return,
        };
        match cmd {
            Command::Contact => {
                let existing = match &self.page {
                    ActivePage::PatientDetail(p) => p
                        .patient
                        .as_ref()
                        .and_then(|x| x.emergency_contact.clone()),
                    _ => None,
                };
                let mut form = match &existing {
                    Some(contact) => EmergencyContactForm::edit(contact),
                    None => EmergencyContactForm::new(patient_id),
                };
                if self.fill_form(&mut form.form).await {
                    if let (Ok(dto), ActivePage::PatientDetail(p)) =
                        (form.payload(), &mut self.page)
                    {
                        p.save_contact(dto).await;
                    }
                }
            }
            Command::History => {
                let existing = match &self.page {
                    ActivePage::PatientDetail(p) => p.history.value().cloned(),
                    _ => None,
                };
                let mut form = match &existing {
                    Some(history) => MedicalHistoryForm::edit(history),
                    None => MedicalHistoryForm::new(patient_id),
                };
                if self.fill_form(&mut form.form).await {
                    if let (Ok(dto), ActivePage::PatientDetail(p)) =
                        (form.payload(), &mut self.page)
                    {
                        p.save_history(dto).await;
                    }
                }
            }
            other => not_here(other),
        }
    }

    async fn appointments_command(&mut self, cmd: Command) {
        match cmd {
            Command::New => {
                let identity = self.session.current();
                let mut form = AppointmentForm::new(identity.as_ref());
                if self.fill_form(&mut form.form).await {
                    if let (Ok(dto), ActivePage::Appointments(p)) =
                        (form.payload(), &mut self.page)
                    {
                        p.create(dto).await;
                    }
                }
            }
            Command::Edit(id) => {
                let appointment = match &self.page {
                    ActivePage::Appointments(p) => {
                        p.appointments.iter().find(|a| a.id == id).cloned()
                    }
                    _ => None,
                };
                let Some(appointment) = appointment else {
                    println!("Cita {} no está en la lista", id);
                    return;
                };
                let identity = self.session.current();
                let mut form = AppointmentForm::edit(&appointment, identity.as_ref());
                if self.fill_form(&mut form.form).await {
                    if let (Ok(dto), ActivePage::Appointments(p)) =
                        (form.payload(), &mut self.page)
                    {
                        p.update(id, dto).await;
                    }
                }
            }
            Command::Confirm(id) => {
                if let ActivePage::Appointments(p) = &mut self.page {
                    p.confirm_appointment(id).await;
                }
            }
            Command::Cancel(id) => {
                if let ActivePage::Appointments(p) = &mut self.page {
                    p.request_cancel(id);
                }
                if self.confirm_prompt("¿Cancelar la cita?").await {
                    if let ActivePage::Appointments(p) = &mut self.page {
                        p.confirm_cancel().await;
                    }
                } else if let ActivePage::Appointments(p) = &mut self.page {
                    p.dismiss_cancel();
                }
            }
            Command::Delete(id) => {
                if let ActivePage::Appointments(p) = &mut self.page {
                    p.request_delete(id);
                }
                if self.confirm_prompt("¿Eliminar la cita?").await {
                    if let ActivePage::Appointments(p) = &mut self.page {
                        p.confirm_delete().await;
                    }
                } else if let ActivePage::Appointments(p) = &mut self.page {
                    p.cancel_delete();
                }
            }
            Command::Open(id) => self.navigate(Route::AppointmentDetail(id)).await,
            Command::Finalize => {
                println!("Use 'open <id>' y luego 'go /appointments/<id>/consultation'");
            }
            other => not_here(other),
        }
    }

    async fn appointment_detail_command(&mut self, cmd: Command) {
        match cmd {
            Command::Vitals => {
                let (appointment_id, existing) = match &self.page {
                    ActivePage::AppointmentDetail(p) => {
                        (p.appointment_id, p.vitals.value().cloned())
                    }
                    _ => return,
                };
                let mut form = match &existing {
                    Some(vitals) => VitalSignsForm::edit(vitals),
                    None => VitalSignsForm::new(appointment_id),
                };
                if self.fill_form(&mut form.form).await {
                    if let Some(bmi) = form.current_bmi() {
                        println!("IMC calculado: {}", bmi);
                    }
                    if let (Ok(dto), ActivePage::AppointmentDetail(p)) =
                        (form.payload(), &mut self.page)
                    {
                        p.save_vitals(dto).await;
                    }
                }
            }
            Command::Finalize => {
                if let Route::AppointmentDetail(id) = self.route {
                    self.navigate(Route::Consultation(id)).await;
                }
            }
            other => not_here(other),
        }
    }

    async fn consultation_command(&mut self, cmd: Command) {
        match cmd {
            Command::Finalize => {
                let appointment = match &self.page {
                    ActivePage::Consultation(p) => p.appointment.clone(),
                    _ => None,
                };
                let Some(appointment) = appointment else {
                    println!("La cita no está cargada");
                    return;
                };
                let mut form = ConsultationForm::new(
                    appointment.patient_id,
                    appointment.doctor_id,
                    appointment.id,
                );
                if self.fill_form(&mut form.form).await {
                    if let (Ok(dto), ActivePage::Consultation(p)) =
                        (form.payload(), &mut self.page)
                    {
                        let _ = p.finalize(dto).await;
                    }
                }
            }
            other => not_here(other),
        }
    }

    async fn doctors_command(&mut self, cmd: Command) {
        match cmd {
            Command::New => {
                let mut form = DoctorForm::new();
                if self.fill_form(&mut form.form).await {
                    if let (Ok(dto), ActivePage::Doctors(p)) = (form.payload(), &mut self.page)
                    {
                        p.create(dto).await;
                    }
                }
            }
            Command::Edit(id) => {
                let doctor = match &self.page {
                    ActivePage::Doctors(p) => p.doctors.iter().find(|d| d.id == id).cloned(),
                    _ => None,
                };
                let Some(doctor) = doctor else {
                    println!("Doctor {} no está en la lista", id);
                    return;
                };
                let mut form = DoctorForm::edit(&doctor);
                if self.fill_form(&mut form.form).await {
                    if let (Ok(dto), ActivePage::Doctors(p)) = (form.payload(), &mut self.page)
                    {
                        p.update(id, dto).await;
                    }
                }
            }
            Command::Delete(id) => {
                if let ActivePage::Doctors(p) = &mut self.page {
                    p.request_delete(id);
                }
                if self.confirm_prompt("¿Eliminar el doctor?").await {
                    if let ActivePage::Doctors(p) = &mut self.page {
                        p.confirm_delete().await;
                    }
                } else if let ActivePage::Doctors(p) = &mut self.page {
                    p.cancel_delete();
                }
            }
            Command::Open(id) => self.navigate(Route::DoctorDetail(id)).await,
            other => not_here(other),
        }
    }

    async fn nurses_command(&mut self, cmd: Command) {
        match cmd {
            Command::New => {
                let mut form = NurseForm::new();
                if self.fill_form(&mut form.form).await {
                    if let (Ok(dto), ActivePage::Nurses(p)) = (form.payload(), &mut self.page) {
                        p.create(dto).await;
                    }
                }
            }
            Command::Edit(id) => {
                let nurse = match &self.page {
                    ActivePage::Nurses(p) => p.nurses.iter().find(|n| n.id == id).cloned(),
                    _ => None,
                };
                let Some(nurse) = nurse else {
                    println!("Enfermera {} no está en la lista", id);
                    return;
                };
                let mut form = NurseForm::edit(&nurse);
                if self.fill_form(&mut form.form).await {
                    if let (Ok(dto), ActivePage::Nurses(p)) = (form.payload(), &mut self.page) {
                        p.update(id, dto).await;
                    }
                }
            }
            Command::Delete(id) => {
                if let ActivePage::Nurses(p) = &mut self.page {
                    p.request_delete(id);
                }
                if self.confirm_prompt("¿Eliminar la enfermera?").await {
                    if let ActivePage::Nurses(p) = &mut self.page {
                        p.confirm_delete().await;
                    }
                } else if let ActivePage::Nurses(p) = &mut self.page {
                    p.cancel_delete();
                }
            }
            Command::Open(id) => self.navigate(Route::NurseDetail(id)).await,
            other => not_here(other),
        }
    }

    async fn login_flow(&mut self) {
        let mut form = LoginForm::new();
        if !self.fill_form(&mut form.form).await {
            return;
        }
        let Ok(request) = form.payload() else { return };
        match self.api.login(request).await {
            Ok(token) => match self.session.login(&token) {
                Ok(identity) => {
                    self.toasts.success(format!("Bienvenido, {}", identity.name));
                    self.navigate(Route::Home).await;
                }
                Err(e) => self.toasts.error(format!("Token inválido: {}", e)),
            },
            Err(e) => self.toasts.error(format!("Error de acceso: {}", e)),
        }
    }

    /// Walks the form's fields on the terminal, one step at a time, until the
    /// form is submittable or the user gives up on a failing pass.
    async fn fill_form(&mut self, form: &mut Form) -> bool {
        loop {
            let fields: Vec<(&'static str, String, String, bool)> = form
                .fields_in_current_step()
                .iter()
                .map(|f| {
                    (
                        f.name,
                        f.label.to_string(),
                        form.value(f.name).to_string(),
                        form.is_disabled(f.name),
                    )
                })
                .collect();
            for (name, label, current, disabled) in fields {
                if disabled {
                    println!("  {} {} (bloqueado)", label.clone().dark_grey(), current);
                    continue;
                }
                let shown = if current.is_empty() {
                    label.clone()
                } else {
                    format!("{} [{}]", label, current)
                };
                print!("  {}: ", shown);
                let _ = io::stdout().flush();
                let Ok(Some(line)) = self.lines.next_line().await else {
                    return false;
                };
                let line = line.trim();
                if !line.is_empty() {
                    form.set(name, line);
                }
                form.blur(name);
                if let Some(error) = form.visible_error(name) {
                    println!("    {}", error.red());
                }
            }
            if form.is_final_step() {
                if form.can_submit() {
                    return true;
                }
                if !self.confirm_prompt("Hay errores de validación, ¿reintentar?").await {
                    return false;
                }
            } else if !form.advance() {
                if !self.confirm_prompt("El paso tiene errores, ¿reintentar?").await {
                    return false;
                }
            }
        }
    }

    async fn confirm_prompt(&mut self, question: &str) -> bool {
        print!("{} (s/n): ", question.yellow());
        let _ = io::stdout().flush();
        match self.lines.next_line().await {
            Ok(Some(line)) => matches!(line.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y"),
            _ => false,
        }
    }

    fn drain_toasts(&self) {
        for toast in self.toasts.drain() {
            let line = match toast.kind {
                ToastKind::Success => format!("✔ {}", toast.message).green(),
                ToastKind::Error => format!("✘ {}", toast.message).red(),
                ToastKind::Warning => format!("⚠ {}", toast.message).yellow(),
                ToastKind::Info => format!("ℹ {}", toast.message).cyan(),
            };
            println!("{}", line);
        }
    }

    fn render(&self) {
        let trail: Vec<String> = breadcrumbs(self.route)
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        println!("{}", trail.join(" / ").dark_grey());
        match &self.page {
            ActivePage::None => {
                println!("Use 'login' para iniciar sesión");
            }
            ActivePage::Home => {
                if let Some(identity) = self.session.current() {
                    println!("Hola, {} ({})", identity.name, identity.role);
                    for item in sections(identity.role) {
                        println!("  {}  {}", item.route.path().dark_cyan(), item.label);
                    }
                    for card in home_cards(identity.role) {
                        if !card.is_available() {
                            println!("  {}  {}", "—".dark_grey(), card.title.dark_grey());
                        }
                    }
                }
            }
            ActivePage::Patients(p) => render_table(&p.table, &p.patients),
            ActivePage::Appointments(p) => render_table(&p.table, &p.appointments),
            ActivePage::Doctors(p) => render_table(&p.table, &p.doctors),
            ActivePage::Nurses(p) => render_table(&p.table, &p.nurses),
            ActivePage::PatientDetail(p) => {
                if let Some(patient) = &p.patient {
                    println!("{} — {}", patient.full_name().bold(), patient.email);
                    println!("  Tel: {}  Dirección: {}", patient.phone, patient.address);
                    match &patient.emergency_contact {
                        Some(c) => println!("  Contacto: {} {} ({})", c.name, c.last_name, c.phone),
                        None => println!("  Sin contacto de emergencia"),
                    }
                    render_subfetch("Historial médico", &p.history, |h| {
                        h.allergies.clone().unwrap_or_else(|| "sin alergias".into())
                    });
                    render_subfetch("Citas", &p.appointments, |a| format!("{} citas", a.len()));
                }
            }
            ActivePage::AppointmentDetail(p) => {
                if let Some(a) = &p.appointment {
                    println!(
                        "{} {} — {} ({})",
                        a.date,
                        a.time.clone().bold(),
                        a.specialty,
                        a.status
                    );
                    println!("  Motivo: {}", a.reason);
                    render_subfetch("Signos vitales", &p.vitals, |v| {
                        format!("TA {}  FC {}", v.blood_pressure, v.heart_rate)
                    });
                    render_subfetch("Historial", &p.history, |h| {
                        h.allergies.clone().unwrap_or_else(|| "registrado".into())
                    });
                    render_subfetch("Consulta", &p.consultation, |c| c.diagnosis.clone());
                }
            }
            ActivePage::Consultation(p) => {
                if let Some(a) = &p.appointment {
                    println!("Consulta de la cita #{} — {}", a.id, a.status);
                    if p.vitals_missing() {
                        println!("{}", "Sin signos vitales registrados".yellow());
                    }
                    println!("Use 'finalize' para capturar y finalizar la consulta");
                }
            }
            ActivePage::DoctorDetail(p) => {
                if let Some(d) = &p.doctor {
                    println!("{} — {}", d.full_name().bold(), d.specialty);
                    println!("  Cédula: {}  Tel: {}", d.license_number, d.phone);
                }
            }
            ActivePage::NurseDetail(p) => {
                if let Some(n) = &p.nurse {
                    println!("{}", n.full_name().bold());
                    println!("  Tel: {}  Email: {}", n.phone, n.email);
                }
            }
        }
    }
}

/// The narrow table surface the shell needs, object-safe so `on_table` can
/// treat every entity table uniformly.
trait TableOps {
    fn toggle_sort_owned(&mut self, key: &str);
    fn set_text_filter_owned(&mut self, key: &str, value: String);
    fn clear_filter_owned(&mut self, key: &str);
    fn set_page(&mut self, page: usize);
    fn set_page_size(&mut self, size: usize);
}

impl<T> TableOps for DataTable<T> {
    fn toggle_sort_owned(&mut self, key: &str) {
        if let Some(key) = self.columns().iter().map(|c| c.key).find(|k| *k == key) {
            self.toggle_sort(key);
        }
    }

    fn set_text_filter_owned(&mut self, key: &str, value: String) {
        if let Some(key) = self.columns().iter().map(|c| c.key).find(|k| *k == key) {
            self.set_filter(key, FilterValue::Text(value));
        }
    }

    fn clear_filter_owned(&mut self, key: &str) {
        if let Some(key) = self.columns().iter().map(|c| c.key).find(|k| *k == key) {
            self.clear_filter(key);
        }
    }

    fn set_page(&mut self, page: usize) {
        DataTable::set_page(self, page);
    }

    fn set_page_size(&mut self, size: usize) {
        DataTable::set_page_size(self, size);
    }
}

fn render_subfetch<T>(label: &str, fetch: &crate::pages::SubFetch<T>, summary: impl Fn(&T) -> String) {
    use crate::pages::SubFetch;
    match fetch {
        SubFetch::Pending => println!("  {}: cargando…", label),
        SubFetch::Loaded(Some(v)) => println!("  {}: {}", label, summary(v)),
        SubFetch::Loaded(None) => println!("  {}: sin registro", label),
        SubFetch::Failed(e) => println!("  {}: {}", label, format!("error: {}", e).red()),
    }
}

fn render_table<T>(table: &DataTable<T>, rows: &[T]) {
    let view: TableView<'_, T> = table.view(rows);
    let keys: Vec<&str> = table
        .columns()
        .iter()
        .filter(|c| c.kind != crate::table::ColumnKind::Actions)
        .map(|c| c.key)
        .collect();

    let mut widths: Vec<usize> = table
        .columns()
        .iter()
        .filter(|c| keys.contains(&c.key))
        .map(|c| c.label.chars().count())
        .collect();
    let rendered: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| keys.iter().map(|k| table.render_cell(k, row)).collect())
        .collect();
    for cells in &rendered {
        for (i, cell) in cells.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let header: Vec<String> = table
        .columns()
        .iter()
        .filter(|c| keys.contains(&c.key))
        .enumerate()
        .map(|(i, c)| format!("{:w$}", c.label, w = widths[i]))
        .collect();
    println!("{}", header.join("  ").bold());
    for cells in &rendered {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:w$}", cell, w = widths[i]))
            .collect();
        println!("{}", line.join("  "));
    }
    println!(
        "{}",
        format!(
            "página {}/{} — {} registros (tamaño {})",
            view.page, view.total_pages, view.filtered_count, view.page_size
        )
        .dark_grey()
    );
}

fn not_here(cmd: Command) {
    println!("'{:?}' no aplica en esta página; 'help' muestra los comandos", cmd);
}

fn print_help() {
    println!("Comandos:");
    println!("  go <ruta>            navegar (/patients, /appointments/3, …)");
    println!("  login / logout       sesión");
    println!("  sort <col>           alternar orden por columna");
    println!("  filter <col> <txt>   filtrar columna; sin texto la limpia");
    println!("  page <n> / size <n>  paginación");
    println!("  new / edit <id>      abrir formulario");
    println!("  delete <id>          eliminar con confirmación");
    println!("  confirm <id>         confirmar cita");
    println!("  cancel <id>          cancelar cita con confirmación");
    println!("  open <id>            abrir detalle");
    println!("  vitals / history / contact   registros clínicos del detalle");
    println!("  finalize             capturar y finalizar consulta");
    println!("  refresh              recargar la página actual");
    println!("  quit                 salir");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_with_arguments() {
        assert_eq!(parse_command("go /patients"), Command::Go("/patients".into()));
        assert_eq!(parse_command("sort name"), Command::Sort("name".into()));
        assert_eq!(
            parse_command("filter name ana ruiz"),
            Command::Filter("name".into(), "ana ruiz".into())
        );
        assert_eq!(parse_command("filter name"), Command::ClearFilter("name".into()));
        assert_eq!(parse_command("page 3"), Command::Page(3));
        assert_eq!(parse_command("delete 14"), Command::Delete(14));
        assert_eq!(parse_command("  "), Command::Empty);
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn malformed_arguments_stay_unknown() {
        assert!(matches!(parse_command("page tres"), Command::Unknown(_)));
        assert!(matches!(parse_command("delete abc"), Command::Unknown(_)));
        assert!(matches!(parse_command("teleport home"), Command::Unknown(_)));
    }
}
