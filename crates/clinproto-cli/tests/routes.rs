use clinproto_auth::Credentials;
use clinproto_cli::routes::{Access, Route, guard, nav_links};
use clinproto_core::models::user::{User, UserRole};

fn signed_in(role: UserRole) -> Credentials {
    Credentials {
        access_token: Some("access".to_string()),
        refresh_token: Some("refresh".to_string()),
        user: Some(User {
            id: 7,
            email: "someone@example.com".to_string(),
            role,
            is_active: true,
            created_at: jiff::civil::date(2025, 11, 16).at(10, 30, 0, 0),
        }),
    }
}

#[test]
fn parses_every_page_path() {
    let cases = [
        ("/", Route::Home),
        ("/login", Route::Login),
        ("/register", Route::Register),
        ("/protocols", Route::Protocols),
        ("/protocols/3", Route::ProtocolDetail(3)),
        ("/protocols/3/prescreen", Route::PreScreen(3)),
        ("/providers", Route::Providers),
        ("/patient/plans", Route::PatientPlans),
        ("/patient/plans/4", Route::PatientPlan(4)),
        ("/therapist/dashboard", Route::TherapistDashboard),
        ("/therapist/patients", Route::TherapistPatients),
        ("/therapist/patients/5", Route::TherapistPatient(5)),
        ("/therapist/sessions/6", Route::TherapistSession(6)),
        ("/admin/protocols", Route::AdminProtocols),
        ("/admin/protocols/new", Route::AdminProtocolNew),
        ("/admin/protocols/9/edit", Route::AdminProtocolEdit(9)),
    ];
    for (path, expected) in cases {
        assert_eq!(Route::parse(path), Some(expected), "{path}");
        assert_eq!(expected.path(), path);
    }
}

#[test]
fn parse_tolerates_trailing_slash_and_query() {
    assert_eq!(Route::parse("/protocols/"), Some(Route::Protocols));
    assert_eq!(
        Route::parse("/protocols?page=2&size=10"),
        Some(Route::Protocols)
    );
    assert_eq!(Route::parse(""), Some(Route::Home));
}

#[test]
fn parse_rejects_unknown_paths_and_bad_ids() {
    assert_eq!(Route::parse("/nowhere"), None);
    assert_eq!(Route::parse("/protocols/abc"), None);
    assert_eq!(Route::parse("/protocols/0"), None);
    assert_eq!(Route::parse("/protocols/-1"), None);
    assert_eq!(Route::parse("/admin/protocols/3"), None);
}

#[test]
fn catalogue_pages_are_public() {
    for route in [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Protocols,
        Route::ProtocolDetail(1),
    ] {
        assert!(!route.is_private(), "{route}");
        assert_eq!(guard(route, &Credentials::default()), Access::Allow);
    }
}

#[test]
fn private_pages_redirect_anonymous_users() {
    for route in [
        Route::PreScreen(1),
        Route::Providers,
        Route::PatientPlans,
        Route::TherapistDashboard,
        Route::AdminProtocols,
    ] {
        assert_eq!(
            guard(route, &Credentials::default()),
            Access::RedirectToLogin,
            "{route}"
        );
    }
}

#[test]
fn empty_access_token_counts_as_signed_out() {
    let mut creds = signed_in(UserRole::Patient);
    creds.access_token = Some(String::new());
    assert_eq!(guard(Route::PatientPlans, &creds), Access::RedirectToLogin);
}

#[test]
fn prescreen_is_open_to_any_signed_in_role() {
    for role in UserRole::ALL {
        assert_eq!(guard(Route::PreScreen(2), &signed_in(role)), Access::Allow);
    }
}

#[test]
fn patient_pages_are_patient_only() {
    assert_eq!(
        guard(Route::PatientPlan(1), &signed_in(UserRole::Patient)),
        Access::Allow
    );
    assert_eq!(
        guard(Route::PatientPlan(1), &signed_in(UserRole::Therapist)),
        Access::Forbidden
    );
}

#[test]
fn therapist_pages_admit_clinicians() {
    let route = Route::TherapistSession(3);
    assert_eq!(guard(route, &signed_in(UserRole::Therapist)), Access::Allow);
    assert_eq!(guard(route, &signed_in(UserRole::ClinicAdmin)), Access::Allow);
    assert_eq!(guard(route, &signed_in(UserRole::MedicalDirector)), Access::Allow);
    assert_eq!(guard(route, &signed_in(UserRole::Patient)), Access::Forbidden);
    assert_eq!(guard(route, &signed_in(UserRole::PlatformAdmin)), Access::Forbidden);
}

#[test]
fn admin_pages_admit_authors() {
    let route = Route::AdminProtocolNew;
    assert_eq!(guard(route, &signed_in(UserRole::PlatformAdmin)), Access::Allow);
    assert_eq!(guard(route, &signed_in(UserRole::MedicalDirector)), Access::Allow);
    assert_eq!(guard(route, &signed_in(UserRole::Therapist)), Access::Forbidden);
}

#[test]
fn role_restricted_page_without_cached_user_is_forbidden() {
    let mut creds = signed_in(UserRole::Therapist);
    creds.user = None;
    assert_eq!(guard(Route::TherapistDashboard, &creds), Access::Forbidden);
    assert_eq!(guard(Route::Providers, &creds), Access::Allow);
}

#[test]
fn nav_links_follow_role() {
    let labels = |role| {
        nav_links(role)
            .into_iter()
            .map(|l| l.label)
            .collect::<Vec<_>>()
    };

    assert_eq!(labels(None), ["Home", "Protocols", "Sign in", "Register"]);
    assert_eq!(
        labels(Some(UserRole::Patient)),
        ["Protocols", "My Treatment Plans", "Find Providers"]
    );
    assert_eq!(
        labels(Some(UserRole::Therapist)),
        ["Protocols", "Dashboard", "Patients"]
    );
    assert_eq!(
        labels(Some(UserRole::MedicalDirector)),
        ["Protocols", "Dashboard", "Patients", "Manage Protocols"]
    );
    assert_eq!(
        labels(Some(UserRole::PlatformAdmin)),
        ["Protocols", "Manage Protocols"]
    );
}

#[test]
fn every_nav_link_is_reachable_by_its_role() {
    for role in UserRole::ALL {
        let creds = signed_in(role);
        for link in nav_links(Some(role)) {
            assert_eq!(guard(link.route, &creds), Access::Allow, "{role} -> {}", link.route);
        }
    }
}
