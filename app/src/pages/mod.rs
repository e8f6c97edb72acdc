// app/src/pages/mod.rs
//
// Page containers orchestrate fetch, table/card rendering, form submission and
// refetch for one entity each. They hold disposable per-page copies of backend
// data; navigating away drops the page and with it any late response.

pub mod appointments;
pub mod consultation;
pub mod home;
pub mod patients;
pub mod staff;

#[cfg(test)]
pub(crate) mod fake;

pub use appointments::{AppointmentDetailPage, AppointmentsPage};
pub use consultation::{ConsultationPage, FinalizeOutcome};
pub use home::{home_cards, HomeCard};
pub use patients::{PatientDetailPage, PatientsPage};
pub use staff::{DoctorDetailPage, DoctorsPage, NurseDetailPage, NursesPage};

/// List-page lifecycle. A mutation moves Ready to Submitting and back through
/// a full refetch on success; on failure the page stays Ready with its
/// previous rows and an error toast. Never optimistic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Submitting,
    Error(String),
}

impl Phase {
    pub fn is_ready(&self) -> bool {
        *self == Phase::Ready
    }
}

/// One secondary fetch on a detail page. Each sub-resource loads behind its
/// own flag so the page can render partially while slower fetches are
/// pending; a failed sub-fetch never takes the page down.
#[derive(Debug, Clone, PartialEq)]
pub enum SubFetch<T> {
    Pending,
    Loaded(Option<T>),
    Failed(String),
}

impl<T> SubFetch<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubFetch::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            SubFetch::Loaded(Some(v)) => Some(v),
            _ => None,
        }
    }

    /// Loaded and confirmed absent, as opposed to still pending or failed.
    pub fn is_absent(&self) -> bool {
        matches!(self, SubFetch::Loaded(None))
    }

    pub(crate) fn from_result(
        result: Result<Option<T>, client::ApiError>,
    ) -> SubFetch<T> {
        match result {
            Ok(v) => SubFetch::Loaded(v),
            Err(e) => SubFetch::Failed(e.to_string()),
        }
    }
}
