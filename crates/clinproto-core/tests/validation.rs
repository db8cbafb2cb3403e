use clinproto_core::models::ai::ProtocolExtractionRequest;
use clinproto_core::models::patient::ConsentRequest;
use clinproto_core::models::protocol::{
    EvidenceLevel, ProtocolCreate, ProtocolStepCreate, StepType, TherapyType,
};
use clinproto_core::validation::{
    self, FormErrors, PASSWORD_RULE, validate_consent, validate_extraction_request,
    validate_login, validate_protocol_form, validate_register, validate_step_form,
};

#[test]
fn login_requires_both_fields() {
    let errors = validate_login("", "").unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get("email"), Some("This field is required"));
    assert_eq!(errors.get("password"), Some("This field is required"));
}

#[test]
fn login_rejects_malformed_email() {
    let errors = validate_login("not-an-email", "secret").unwrap_err();
    assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
    assert!(errors.get("password").is_none());
}

#[test]
fn login_accepts_well_formed_input() {
    assert!(validate_login("pat@example.com", "anything").is_ok());
}

#[test]
fn password_complexity() {
    assert!(validation::password("password", "Str0ng!pass").is_ok());
    for weak in ["short1!", "alllowercase1!", "ALLUPPERCASE1!", "NoDigits!!", "NoSpecial123"] {
        let err = validation::password("password", weak).unwrap_err();
        assert_eq!(err.message, PASSWORD_RULE, "{weak} should be rejected");
    }
}

#[test]
fn register_checks_confirmation() {
    let errors = validate_register("new@example.com", "Str0ng!pass", "Str0ng!pas").unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("confirm_password"), Some("Passwords do not match"));

    assert!(validate_register("new@example.com", "Str0ng!pass", "Str0ng!pass").is_ok());
}

#[test]
fn first_error_per_field_wins() {
    let mut errors = FormErrors::new();
    errors.add("email", "first");
    errors.add("email", "second");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("email"), Some("first"));
    assert_eq!(errors.to_string(), "email: first");
}

#[test]
fn protocol_form_flags_blank_fields_and_non_positive_numbers() {
    let form = ProtocolCreate {
        name: "  ".to_string(),
        version: "1.0".to_string(),
        therapy_type: TherapyType::Ketamine,
        condition_treated: String::new(),
        evidence_level: EvidenceLevel::Phase2,
        overview: None,
        duration_weeks: Some(0),
        total_sessions: Some(6),
        evidence_sources: None,
    };
    let errors = validate_protocol_form(&form).unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["name", "condition_treated", "duration_weeks"]);
}

#[test]
fn step_form_requires_title_and_positive_order() {
    let form = ProtocolStepCreate {
        sequence_order: 0,
        step_type: StepType::Preparation,
        title: String::new(),
        description: None,
        duration_minutes: None,
        required_roles: None,
        clinical_scales: None,
        evaluation_rules: None,
        branch_outcomes: None,
        vitals_monitoring: None,
    };
    let errors = validate_step_form(&form).unwrap_err();
    assert!(errors.get("title").is_some());
    assert!(errors.get("sequence_order").is_some());
}

#[test]
fn consent_must_be_agreed_and_signed() {
    let form = ConsentRequest {
        treatment_plan_id: 1,
        consent_text: "I consent".to_string(),
        signature: String::new(),
        agreed: false,
    };
    let errors = validate_consent(&form).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get("agreed"), Some("You must agree to the consent terms"));
}

#[test]
fn extraction_text_length_is_bounded() {
    let mut form = ProtocolExtractionRequest {
        research_text: "too short".to_string(),
        therapy_type: "psilocybin".to_string(),
        condition: "depression".to_string(),
    };
    assert!(validate_extraction_request(&form).is_err());

    form.research_text = "x".repeat(100);
    assert!(validate_extraction_request(&form).is_ok());
}
