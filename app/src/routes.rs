// app/src/routes.rs

use std::fmt;
use std::str::FromStr;

/// Client-side routes. Everything except `Login` requires a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    Patients,
    PatientDetail(i32),
    Appointments,
    AppointmentDetail(i32),
    Consultation(i32),
    Doctors,
    DoctorDetail(i32),
    Nurses,
    NurseDetail(i32),
}

impl Route {
    pub fn is_protected(self) -> bool {
        self != Route::Login
    }

    pub fn path(self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Home => "/home".to_string(),
            Route::Patients => "/patients".to_string(),
            Route::PatientDetail(id) => format!("/patients/{}", id),
            Route::Appointments => "/appointments".to_string(),
            Route::AppointmentDetail(id) => format!("/appointments/{}", id),
            Route::Consultation(id) => format!("/appointments/{}/consultation", id),
            Route::Doctors => "/doctors".to_string(),
            Route::DoctorDetail(id) => format!("/doctors/{}", id),
            Route::Nurses => "/nurses".to_string(),
            Route::NurseDetail(id) => format!("/nurses/{}", id),
        }
    }

    /// The list page a detail page falls back to when its entity is missing.
    pub fn parent_list(self) -> Option<Route> {
        match self {
            Route::PatientDetail(_) => Some(Route::Patients),
            Route::AppointmentDetail(_) | Route::Consultation(_) => Some(Route::Appointments),
            Route::DoctorDetail(_) => Some(Route::Doctors),
            Route::NurseDetail(_) => Some(Route::Nurses),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown path: {0}")]
pub struct UnknownPath(pub String);

impl FromStr for Route {
    type Err = UnknownPath;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.trim().trim_matches('/').split('/').collect();
        let route = match segments.as_slice() {
            ["login"] => Route::Login,
            ["home"] => Route::Home,
            ["patients"] => Route::Patients,
            ["patients", id] => Route::PatientDetail(parse_id(s, id)?),
            ["appointments"] => Route::Appointments,
            ["appointments", id] => Route::AppointmentDetail(parse_id(s, id)?),
            ["appointments", id, "consultation"] => Route::Consultation(parse_id(s, id)?),
            ["doctors"] => Route::Doctors,
            ["doctors", id] => Route::DoctorDetail(parse_id(s, id)?),
            ["nurses"] => Route::Nurses,
            ["nurses", id] => Route::NurseDetail(parse_id(s, id)?),
            _ => return Err(UnknownPath(s.to_string())),
        };
        Ok(route)
    }
}

fn parse_id(full: &str, raw: &str) -> Result<i32, UnknownPath> {
    raw.parse().map_err(|_| UnknownPath(full.to_string()))
}

/// Applies the navigation guard: unauthenticated access to a protected route
/// goes to `/login`; unknown paths go to `/`, which resolves to `/home` or
/// `/login` by session presence; a signed-in user asking for `/login` lands
/// on `/home`.
pub fn resolve(requested: &str, authenticated: bool) -> Route {
    let fallback = if authenticated { Route::Home } else { Route::Login };
    match requested.parse::<Route>() {
        Ok(Route::Login) if authenticated => Route::Home,
        Ok(route) if route.is_protected() && !authenticated => Route::Login,
        Ok(route) => route,
        Err(_) => fallback,
    }
}
