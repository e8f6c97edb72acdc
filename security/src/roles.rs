// security/src/roles.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
}

/// What a role may do. Pages ask `role.allows(cap)` instead of combining
/// role booleans at each call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    ManagePatients,
    ManageStaff,
    ScheduleAppointments,
    RecordVitals,
    EditMedicalHistory,
    FinalizeConsultation,
    ViewClinicalRecords,
}

impl Role {
    pub fn allows(self, cap: Capability) -> bool {
        use Capability::*;
        use Role::*;
        match cap {
            ManageStaff => matches!(self, Admin),
            ManagePatients | ScheduleAppointments | RecordVitals | EditMedicalHistory => {
                matches!(self, Admin | Nurse)
            }
            FinalizeConsultation => matches!(self, Admin | Doctor),
            ViewClinicalRecords => true,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn is_doctor(self) -> bool {
        self == Role::Doctor
    }

    pub fn is_nurse(self) -> bool {
        self == Role::Nurse
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Admin => "ADMIN",
            Role::Doctor => "DOCTOR",
            Role::Nurse => "NURSE",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "DOCTOR" => Ok(Role::Doctor),
            "NURSE" => Ok(Role::Nurse),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Capability::*;

    #[test]
    fn staff_management_is_admin_only() {
        assert!(Role::Admin.allows(ManageStaff));
        assert!(!Role::Doctor.allows(ManageStaff));
        assert!(!Role::Nurse.allows(ManageStaff));
    }

    #[test]
    fn nurses_handle_patients_and_vitals_but_not_finalization() {
        assert!(Role::Nurse.allows(ManagePatients));
        assert!(Role::Nurse.allows(RecordVitals));
        assert!(Role::Nurse.allows(EditMedicalHistory));
        assert!(Role::Nurse.allows(ScheduleAppointments));
        assert!(!Role::Nurse.allows(FinalizeConsultation));
    }

    #[test]
    fn doctors_finalize_but_do_not_schedule() {
        assert!(Role::Doctor.allows(FinalizeConsultation));
        assert!(!Role::Doctor.allows(ScheduleAppointments));
        assert!(!Role::Doctor.allows(ManagePatients));
    }

    #[test]
    fn everyone_reads_clinical_records() {
        for r in [Role::Admin, Role::Doctor, Role::Nurse] {
            assert!(r.allows(ViewClinicalRecords));
        }
    }
}
