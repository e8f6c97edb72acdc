// app/src/pages/home.rs

use security::{Capability, Role};

use crate::routes::Route;

/// One entry card on the home page. Cards without a route are placeholders
/// for sections this client does not ship yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeCard {
    pub title: &'static str,
    pub route: Option<Route>,
}

impl HomeCard {
    pub fn is_available(&self) -> bool {
        self.route.is_some()
    }
}

/// Role-aware card set: the four entity sections for everyone, plus the
/// clinical-history placeholder for roles that finalize consultations.
pub fn home_cards(role: Role) -> Vec<HomeCard> {
    let mut cards = vec![
        HomeCard { title: "Pacientes", route: Some(Route::Patients) },
        HomeCard { title: "Citas Médicas", route: Some(Route::Appointments) },
        HomeCard { title: "Doctores", route: Some(Route::Doctors) },
        HomeCard { title: "Enfermeros", route: Some(Route::Nurses) },
    ];
    if role.allows(Capability::FinalizeConsultation) {
        cards.push(HomeCard { title: "Historial", route: None });
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everyone_gets_the_four_entity_cards() {
        for role in [Role::Admin, Role::Doctor, Role::Nurse] {
            let cards = home_cards(role);
            assert!(cards.len() >= 4);
            assert!(cards[0].is_available());
        }
    }

    #[test]
    fn history_card_only_for_finalizing_roles() {
        let has_history =
            |role: Role| home_cards(role).iter().any(|c| c.title == "Historial");
        assert!(has_history(Role::Admin));
        assert!(has_history(Role::Doctor));
        assert!(!has_history(Role::Nurse));
    }
}
