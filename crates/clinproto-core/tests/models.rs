use clinproto_core::models::patient::{PreScreeningResult, RiskLevel};
use clinproto_core::models::protocol::{
    EvidenceLevel, Protocol, ProtocolStatus, ProtocolUpdate, SafetyCheck, SafetyCheckCreate,
    Severity, StepType, TherapyType,
};
use clinproto_core::models::treatment::TreatmentPlanDetail;
use clinproto_core::models::user::{User, UserRole};
use serde_json::json;

fn protocol_json() -> serde_json::Value {
    json!({
        "id": 7,
        "name": "Psilocybin for Depression",
        "version": "1.2",
        "status": "active",
        "therapy_type": "psilocybin",
        "condition_treated": "treatment_resistant_depression",
        "evidence_level": "phase_3_trial",
        "overview": null,
        "duration_weeks": 12,
        "total_sessions": 8,
        "created_at": "2025-11-16T10:30:00.123456",
        "updated_at": null
    })
}

#[test]
fn protocol_deserializes_from_server_shape() {
    let protocol: Protocol = serde_json::from_value(protocol_json()).unwrap();
    assert_eq!(protocol.id, 7);
    assert_eq!(protocol.status, ProtocolStatus::Active);
    assert_eq!(protocol.therapy_type, TherapyType::Psilocybin);
    assert_eq!(protocol.evidence_level, EvidenceLevel::Phase3);
    assert!(protocol.steps.is_none());
    assert!(protocol.ordered_steps().is_empty());
}

#[test]
fn unknown_protocol_status_round_trips() {
    let mut value = protocol_json();
    value["status"] = json!("under_review");
    let protocol: Protocol = serde_json::from_value(value).unwrap();
    assert_eq!(
        protocol.status,
        ProtocolStatus::Other("under_review".to_string())
    );
    let back = serde_json::to_value(&protocol).unwrap();
    assert_eq!(back["status"], "under_review");
}

#[test]
fn ordered_steps_sort_by_sequence() {
    let mut value = protocol_json();
    value["steps"] = json!([
        {
            "id": 2, "protocol_id": 7, "sequence_order": 2, "step_type": "dosing",
            "title": "Dosing", "description": null, "duration_minutes": 480,
            "required_roles": null, "clinical_scales": null,
            "created_at": "2025-11-16T10:30:00"
        },
        {
            "id": 1, "protocol_id": 7, "sequence_order": 1, "step_type": "screening",
            "title": "Screening", "description": null, "duration_minutes": 90,
            "required_roles": ["medical_director"], "clinical_scales": ["MADRS"],
            "created_at": "2025-11-16T10:30:00"
        }
    ]);
    let protocol: Protocol = serde_json::from_value(value).unwrap();
    let titles: Vec<&str> = protocol
        .ordered_steps()
        .iter()
        .map(|s| s.title.as_str())
        .collect();
    assert_eq!(titles, ["Screening", "Dosing"]);
    assert_eq!(protocol.ordered_steps()[1].step_type, StepType::Dosing);
}

#[test]
fn safety_check_accepts_string_override_flag() {
    let check: SafetyCheck = serde_json::from_value(json!({
        "id": 1,
        "protocol_step_id": 3,
        "check_type": "contraindication",
        "condition": {"field": "medications", "contains": "MAOI"},
        "severity": "blocking",
        "override_allowed": "false",
        "override_requirements": null,
        "evidence_source": "FDA label",
        "created_at": "2025-11-16T10:30:00"
    }))
    .unwrap();
    assert!(!check.override_allowed);
    assert_eq!(check.severity, Severity::Blocking);
}

#[test]
fn safety_check_create_sends_override_as_string() {
    let create = SafetyCheckCreate {
        check_type: "vitals".to_string(),
        condition: json!({"heart_rate": {"max": 120}}),
        severity: Severity::Warning,
        override_allowed: true,
        override_requirements: None,
        evidence_source: None,
    };
    let value = serde_json::to_value(&create).unwrap();
    assert_eq!(value["override_allowed"], "true");
    assert_eq!(value["severity"], "warning");
    assert!(value.get("evidence_source").is_none());
}

#[test]
fn empty_protocol_update_serializes_to_empty_object() {
    let update = ProtocolUpdate::default();
    assert!(update.is_empty());
    assert_eq!(serde_json::to_value(&update).unwrap(), json!({}));
}

#[test]
fn user_role_parses_wire_names() {
    assert_eq!("clinic_admin".parse::<UserRole>().unwrap(), UserRole::ClinicAdmin);
    assert!("nurse".parse::<UserRole>().is_err());
    assert_eq!(UserRole::MedicalDirector.to_string(), "medical_director");

    let user: User = serde_json::from_value(json!({
        "id": 1,
        "email": "pat@example.com",
        "role": "patient",
        "is_active": true,
        "created_at": "2025-01-02T03:04:05"
    }))
    .unwrap();
    assert_eq!(user.role, UserRole::Patient);
}

#[test]
fn enum_string_forms_match_wire_names() {
    assert_eq!("car_t".parse::<TherapyType>().unwrap(), TherapyType::CarT);
    assert_eq!(EvidenceLevel::Phase2.to_string(), "phase_2_trial");
    assert_eq!(StepType::DecisionPoint.to_string(), "decision_point");
    assert!("phase_4_trial".parse::<EvidenceLevel>().is_err());
}

#[test]
fn progress_counts_completed_sessions() {
    let plan: TreatmentPlanDetail = serde_json::from_value(json!({
        "id": 4,
        "protocol_id": 7,
        "protocol_name": "Psilocybin for Depression",
        "protocol_version": "1.2",
        "therapist_id": 2,
        "therapist_name": "doc@example.com",
        "clinic_id": null,
        "clinic_name": null,
        "status": "active",
        "start_date": "2025-11-01T09:00:00",
        "estimated_completion": null,
        "customizations": null,
        "sessions": [
            {"id": 1, "scheduled_at": "2025-11-02T09:00:00", "status": "completed", "location": "Clinic A"},
            {"id": 2, "scheduled_at": "2025-11-09T09:00:00", "status": "completed", "location": "Clinic A"},
            {"id": 3, "scheduled_at": "2025-11-23T09:00:00", "status": "scheduled", "location": "Clinic A"},
            {"id": 4, "scheduled_at": "2025-11-16T09:00:00", "status": "scheduled", "location": "Clinic A"},
            {"id": 5, "scheduled_at": "2025-11-30T09:00:00", "status": "cancelled", "location": "Clinic A"},
            {"id": 6, "scheduled_at": "2025-12-07T09:00:00", "status": "scheduled", "location": "Clinic A"}
        ],
        "created_at": "2025-10-30T12:00:00"
    }))
    .unwrap();

    assert_eq!(plan.progress_percent(), 33);
    assert_eq!(plan.next_session().map(|s| s.id), Some(4));
}

#[test]
fn plan_without_sessions_has_zero_progress() {
    let plan: TreatmentPlanDetail = serde_json::from_value(json!({
        "id": 4, "protocol_id": 7, "protocol_name": "P", "protocol_version": "1",
        "therapist_id": 2, "therapist_name": "t", "clinic_id": null, "clinic_name": null,
        "status": "screening", "start_date": "2025-11-01T09:00:00",
        "estimated_completion": null, "customizations": null,
        "created_at": "2025-10-30T12:00:00"
    }))
    .unwrap();
    assert_eq!(plan.progress_percent(), 0);
    assert!(plan.next_session().is_none());
}

#[test]
fn eligibility_result_reads_as_prescreening_verdict() {
    let raw = json!({
        "eligible": false,
        "risk_level": "excluded",
        "contraindications": ["Under 18 years old"],
        "recommendations": ["Please consult with a healthcare provider"],
        "collected_data": {"age": 16}
    });
    let verdict = PreScreeningResult::from_eligibility(&raw).unwrap();
    assert!(!verdict.eligible);
    assert_eq!(verdict.risk_level, RiskLevel::Excluded);
    assert_eq!(verdict.contraindications, ["Under 18 years old"]);

    assert!(PreScreeningResult::from_eligibility(&json!({"eligible": "maybe"})).is_err());
}
