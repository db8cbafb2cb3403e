use clap::Parser;
use clinproto_api::ApiError;
use clinproto_cli::cli::{AdminCommand, Cli, Command, ProtocolsCommand, TherapistCommand};
use clinproto_cli::logging::{LogConfig, LogFormat};
use clinproto_cli::render;
use clinproto_cli::routes::Route;
use clinproto_core::models::protocol::{Severity, TherapyType};
use clinproto_core::models::user::UserRole;
use clinproto_core::validation::validate_register;
use clinproto_store::error::ScreeningError;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("clinproto").chain(args.iter().copied())).unwrap()
}

#[test]
fn global_flags_apply_after_the_subcommand() {
    let cli = parse(&["protocols", "list", "--api-url", "http://x", "-vv", "--log-format", "json"]);
    assert_eq!(cli.api_url.as_deref(), Some("http://x"));
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.log_format, LogFormat::Json);
}

#[test]
fn quiet_and_verbose_conflict() {
    assert!(Cli::try_parse_from(["clinproto", "-q", "-v", "whoami"]).is_err());
}

#[test]
fn log_levels_from_flags() {
    assert_eq!(LogConfig::from_flags(LogFormat::Pretty, 0, false).default_directive, "info");
    assert_eq!(LogConfig::from_flags(LogFormat::Pretty, 1, false).default_directive, "debug");
    assert_eq!(LogConfig::from_flags(LogFormat::Pretty, 3, false).default_directive, "trace");
    assert_eq!(LogConfig::from_flags(LogFormat::Pretty, 0, true).default_directive, "warn");
}

#[test]
fn wire_enums_parse_from_snake_case() {
    let cli = parse(&["protocols", "list", "--therapy-type", "growth_hormone"]);
    let Command::Protocols(ProtocolsCommand::List(args)) = cli.command else {
        panic!("expected protocols list");
    };
    assert_eq!(args.therapy_type, Some(TherapyType::GrowthHormone));
    assert_eq!(args.page, 1);

    assert!(Cli::try_parse_from(["clinproto", "protocols", "list", "--status", "draft"]).is_err());

    let cli = parse(&["register", "a@b.co", "--role", "clinic_admin"]);
    let Command::Register(args) = cli.command else {
        panic!("expected register");
    };
    assert_eq!(args.role, UserRole::ClinicAdmin);

    assert!(Cli::try_parse_from(["clinproto", "register", "a@b.co", "--role", "wizard"]).is_err());
}

#[test]
fn safety_check_condition_is_json() {
    let cli = parse(&[
        "admin",
        "add-check",
        "4",
        "11",
        "--check-type",
        "contraindication",
        "--condition",
        r#"{"field":"age","operator":"<","value":21}"#,
        "--severity",
        "blocking",
    ]);
    let Command::Admin(AdminCommand::AddCheck(args)) = cli.command else {
        panic!("expected admin add-check");
    };
    assert_eq!(args.severity, Severity::Blocking);
    assert_eq!(args.condition["value"], 21);
    assert!(!args.override_allowed);

    assert!(
        Cli::try_parse_from([
            "clinproto", "admin", "add-check", "4", "11", "--check-type", "x", "--condition",
            "{not json", "--severity", "info",
        ])
        .is_err()
    );
}

#[test]
fn decision_criteria_default_to_empty_object() {
    let cli = parse(&["therapist", "decision", "2", "--plan", "5", "--recommendation", "continue"]);
    let Command::Therapist(TherapistCommand::Decision(args)) = cli.command else {
        panic!("expected therapist decision");
    };
    assert_eq!(args.treatment_plan_id, 5);
    assert_eq!(args.criteria, serde_json::json!({}));
}

#[test]
fn commands_map_to_their_pages() {
    let cases: [(&[&str], Option<Route>); 9] = [
        (&["login", "a@b.co"], Some(Route::Login)),
        (&["logout"], None),
        (&["config", "show"], None),
        (&["protocols", "show", "3"], Some(Route::ProtocolDetail(3))),
        (&["prescreen", "quiz", "3"], Some(Route::PreScreen(3))),
        (&["consent", "8", "--signature", "Ana Li", "--agree"], Some(Route::PatientPlan(8))),
        (&["providers", "search"], Some(Route::Providers)),
        (&["therapist", "vitals", "12", "--heart-rate", "70"], Some(Route::TherapistSession(12))),
        (&["admin", "publish", "4"], Some(Route::AdminProtocolEdit(4))),
    ];
    for (args, route) in cases {
        assert_eq!(parse(args).command.route(), route, "{args:?}");
    }
}

#[test]
fn banner_prefers_user_facing_text() {
    let report = eyre::Report::new(ApiError::SessionExpired);
    assert_eq!(
        render::banner(&report),
        "Your session has expired. Please sign in again."
    );

    let report = eyre::Report::new(ScreeningError::AlreadyCompleted);
    assert_eq!(render::banner(&report), "screening is already complete");

    let report = eyre::Report::new(validate_register("bad", "x", "y").unwrap_err());
    let banner = render::banner(&report);
    assert!(banner.starts_with("email: "), "{banner}");
    assert!(banner.contains("confirm_password: Passwords do not match"));

    let report = eyre::eyre!("Please sign in to continue");
    assert_eq!(render::banner(&report), "Please sign in to continue");
}

#[test]
fn badges_render_labels() {
    let cell = render::badge_cell("in_progress");
    assert_eq!(cell.content(), "In Progress");
}
