//! Route table: which pages exist, who may see them, and the role-based
//! navigation built from them.
//!
//! Gating here is presentation only. The server rejects anything a role is
//! not entitled to regardless of what the client shows.

use std::fmt;

use clinproto_auth::Credentials;
use clinproto_core::models::user::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Protocols,
    ProtocolDetail(i64),
    PreScreen(i64),
    Providers,
    PatientPlans,
    PatientPlan(i64),
    TherapistDashboard,
    TherapistPatients,
    TherapistPatient(i64),
    TherapistSession(i64),
    AdminProtocols,
    AdminProtocolNew,
    AdminProtocolEdit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    RedirectToLogin,
    Forbidden,
}

const PATIENT_ONLY: &[UserRole] = &[UserRole::Patient];
const CLINICIANS: &[UserRole] = &[
    UserRole::Therapist,
    UserRole::ClinicAdmin,
    UserRole::MedicalDirector,
];
const AUTHORS: &[UserRole] = &[UserRole::PlatformAdmin, UserRole::MedicalDirector];

impl Route {
    /// Parse a URL-like path. Trailing slashes and a query string are
    /// ignored; ids must be positive integers.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["protocols"] => Route::Protocols,
            ["protocols", id] => Route::ProtocolDetail(parse_id(id)?),
            ["protocols", id, "prescreen"] => Route::PreScreen(parse_id(id)?),
            ["providers"] => Route::Providers,
            ["patient", "plans"] => Route::PatientPlans,
            ["patient", "plans", id] => Route::PatientPlan(parse_id(id)?),
            ["therapist", "dashboard"] => Route::TherapistDashboard,
            ["therapist", "patients"] => Route::TherapistPatients,
            ["therapist", "patients", id] => Route::TherapistPatient(parse_id(id)?),
            ["therapist", "sessions", id] => Route::TherapistSession(parse_id(id)?),
            ["admin", "protocols"] => Route::AdminProtocols,
            ["admin", "protocols", "new"] => Route::AdminProtocolNew,
            ["admin", "protocols", id, "edit"] => Route::AdminProtocolEdit(parse_id(id)?),
            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Protocols => "/protocols".to_string(),
            Route::ProtocolDetail(id) => format!("/protocols/{id}"),
            Route::PreScreen(id) => format!("/protocols/{id}/prescreen"),
            Route::Providers => "/providers".to_string(),
            Route::PatientPlans => "/patient/plans".to_string(),
            Route::PatientPlan(id) => format!("/patient/plans/{id}"),
            Route::TherapistDashboard => "/therapist/dashboard".to_string(),
            Route::TherapistPatients => "/therapist/patients".to_string(),
            Route::TherapistPatient(id) => format!("/therapist/patients/{id}"),
            Route::TherapistSession(id) => format!("/therapist/sessions/{id}"),
            Route::AdminProtocols => "/admin/protocols".to_string(),
            Route::AdminProtocolNew => "/admin/protocols/new".to_string(),
            Route::AdminProtocolEdit(id) => format!("/admin/protocols/{id}/edit"),
        }
    }

    pub fn is_private(&self) -> bool {
        !matches!(
            self,
            Route::Home
                | Route::Login
                | Route::Register
                | Route::Protocols
                | Route::ProtocolDetail(_)
        )
    }

    /// Roles allowed on a private route. `None` means any signed-in user.
    pub fn allowed_roles(&self) -> Option<&'static [UserRole]> {
        match self {
            Route::PatientPlans | Route::PatientPlan(_) => Some(PATIENT_ONLY),
            Route::TherapistDashboard
            | Route::TherapistPatients
            | Route::TherapistPatient(_)
            | Route::TherapistSession(_) => Some(CLINICIANS),
            Route::AdminProtocols | Route::AdminProtocolNew | Route::AdminProtocolEdit(_) => {
                Some(AUTHORS)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn parse_id(segment: &str) -> Option<i64> {
    segment.parse::<i64>().ok().filter(|id| *id > 0)
}

/// Decide whether the holder of `credentials` may open `route`.
pub fn guard(route: Route, credentials: &Credentials) -> Access {
    if !route.is_private() {
        return Access::Allow;
    }
    if !credentials.is_authenticated() {
        return Access::RedirectToLogin;
    }
    match route.allowed_roles() {
        None => Access::Allow,
        Some(roles) => match credentials.role() {
            Some(role) if roles.contains(&role) => Access::Allow,
            _ => Access::Forbidden,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

const fn link(label: &'static str, route: Route) -> NavLink {
    NavLink { label, route }
}

/// Navigation for the signed-in role, or the anonymous set when `None`.
pub fn nav_links(role: Option<UserRole>) -> Vec<NavLink> {
    let Some(role) = role else {
        return vec![
            link("Home", Route::Home),
            link("Protocols", Route::Protocols),
            link("Sign in", Route::Login),
            link("Register", Route::Register),
        ];
    };

    let mut links = vec![link("Protocols", Route::Protocols)];
    if role == UserRole::Patient {
        links.push(link("My Treatment Plans", Route::PatientPlans));
        links.push(link("Find Providers", Route::Providers));
    }
    if CLINICIANS.contains(&role) {
        links.push(link("Dashboard", Route::TherapistDashboard));
        links.push(link("Patients", Route::TherapistPatients));
    }
    if AUTHORS.contains(&role) {
        links.push(link("Manage Protocols", Route::AdminProtocols));
    }
    links
}
