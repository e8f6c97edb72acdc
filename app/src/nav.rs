// app/src/nav.rs

use security::{Capability, Role};

use crate::routes::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
}

/// Sections shown in the navigation shell, filtered by role. Staff pages are
/// listed for everyone with read access; mutating controls are gated inside
/// the pages themselves.
pub fn sections(role: Role) -> Vec<NavItem> {
    let mut items = vec![
        NavItem { label: "Inicio", route: Route::Home },
        NavItem { label: "Pacientes", route: Route::Patients },
        NavItem { label: "Citas", route: Route::Appointments },
    ];
    if role.allows(Capability::ViewClinicalRecords) {
        items.push(NavItem { label: "Doctores", route: Route::Doctors });
        items.push(NavItem { label: "Enfermeras", route: Route::Nurses });
    }
    items
}

/// Breadcrumb trail for the active route, ending at the current location.
pub fn breadcrumbs(route: Route) -> Vec<(String, Route)> {
    let mut trail = vec![("Inicio".to_string(), Route::Home)];
    match route {
        Route::Login | Route::Home => {}
        Route::Patients => trail.push(("Pacientes".to_string(), Route::Patients)),
        Route::PatientDetail(id) => {
            trail.push(("Pacientes".to_string(), Route::Patients));
            trail.push((format!("Paciente #{}", id), route));
        }
        Route::Appointments => trail.push(("Citas".to_string(), Route::Appointments)),
        Route::AppointmentDetail(id) => {
            trail.push(("Citas".to_string(), Route::Appointments));
            trail.push((format!("Cita #{}", id), route));
        }
        Route::Consultation(id) => {
            trail.push(("Citas".to_string(), Route::Appointments));
            trail.push((format!("Cita #{}", id), Route::AppointmentDetail(id)));
            trail.push(("Consulta".to_string(), route));
        }
        Route::Doctors => trail.push(("Doctores".to_string(), Route::Doctors)),
        Route::DoctorDetail(id) => {
            trail.push(("Doctores".to_string(), Route::Doctors));
            trail.push((format!("Doctor #{}", id), route));
        }
        Route::Nurses => trail.push(("Enfermeras".to_string(), Route::Nurses)),
        Route::NurseDetail(id) => {
            trail.push(("Enfermeras".to_string(), Route::Nurses));
            trail.push((format!("Enfermera #{}", id), route));
        }
    }
    trail
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_sees_the_core_sections() {
        for role in [Role::Admin, Role::Doctor, Role::Nurse] {
            let labels: Vec<_> = sections(role).iter().map(|i| i.label).collect();
            assert!(labels.contains(&"Pacientes"));
            assert!(labels.contains(&"Citas"));
        }
    }

    #[test]
    fn consultation_breadcrumbs_walk_through_the_appointment() {
        let trail = breadcrumbs(Route::Consultation(4));
        let routes: Vec<_> = trail.iter().map(|(_, r)| *r).collect();
        assert_eq!(
            routes,
            vec![
                Route::Home,
                Route::Appointments,
                Route::AppointmentDetail(4),
                Route::Consultation(4)
            ]
        );
    }
}
