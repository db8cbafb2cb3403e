use clinproto_api::services::therapist;
use clinproto_core::models::therapist::DecisionPointEvaluation;
use clinproto_core::models::treatment::{SessionDocumentationCreate, TreatmentPlanCreate, VitalsData};
use jiff::Zoned;

use super::Context;
use crate::cli::TherapistCommand;
use crate::render;

const RECOMMENDATIONS: [&str; 3] = ["continue", "adjust", "discontinue"];

fn now() -> clinproto_core::models::DateTime {
    Zoned::now().with_time_zone(jiff::tz::TimeZone::UTC).datetime()
}

pub(super) async fn run(ctx: &Context, cmd: TherapistCommand) -> eyre::Result<()> {
    let api = &ctx.api;
    match cmd {
        TherapistCommand::Dashboard => {
            let dashboard = therapist::dashboard(api).await?;
            let upcoming = therapist::sessions_upcoming(api).await?;

            println!("{}", render::dashboard_summary(&dashboard));
            println!("\nToday");
            if dashboard.today_sessions.is_empty() {
                println!("No sessions scheduled today.");
            } else {
                println!("{}", render::session_list_table(&dashboard.today_sessions));
            }
            if !dashboard.pending_tasks.is_empty() {
                println!("\nPending tasks");
                println!("{}", render::task_table(&dashboard));
            }
            if !upcoming.is_empty() {
                println!("\nNext 7 days");
                println!("{}", render::session_list_table(&upcoming));
            }
        }
        TherapistCommand::Patients => {
            let patients = therapist::patients(api).await?;
            if patients.is_empty() {
                println!("No patients assigned.");
            } else {
                println!("{}", render::patient_table(&patients));
            }
        }
        TherapistCommand::Patient { id } => {
            let patient = therapist::patient(api, id).await?;
            println!("{}", render::patient_detail(&patient));
        }
        TherapistCommand::Plan(args) => {
            let form = TreatmentPlanCreate {
                patient_id: args.patient_id,
                protocol_id: args.protocol_id,
                start_date: args.start_date.unwrap_or_else(now),
                customizations: None,
            };
            let plan = therapist::create_treatment_plan(api, &form).await?;
            println!(
                "Created treatment plan {} on protocol {} v{} ({})",
                plan.id,
                plan.protocol_id,
                plan.protocol_version,
                plan.status.as_str()
            );
        }
        TherapistCommand::Session { id } => {
            let session = therapist::session(api, id).await?;
            println!("{}", render::session_detail(&session));
        }
        TherapistCommand::Vitals(args) => {
            let vitals = VitalsData {
                blood_pressure: args.blood_pressure,
                heart_rate: args.heart_rate,
                temperature: args.temperature,
                spo2: args.spo2,
                timestamp: now(),
                notes: args.notes,
            };
            if vitals.blood_pressure.is_none()
                && vitals.heart_rate.is_none()
                && vitals.temperature.is_none()
                && vitals.spo2.is_none()
            {
                return Err(eyre::eyre!("Enter at least one vital sign"));
            }
            let ack = therapist::log_vitals(api, args.session_id, &vitals).await?;
            println!("{} ({} readings on record)", ack.message, ack.vitals_logged);
        }
        TherapistCommand::Document(args) => {
            let existing = therapist::documentation(api, args.session_id).await?;
            let form = SessionDocumentationCreate {
                therapist_notes: args.notes,
                patient_subjective_notes: args.subjective,
                clinical_scales: args.scales,
                adverse_events: None,
            };
            let ack = therapist::save_documentation(api, args.session_id, &form).await?;
            let verb = if existing.exists() { "Updated" } else { "Saved" };
            println!("{verb} documentation for session {}: {}", ack.treatment_session_id, ack.message);
        }
        TherapistCommand::Complete { id } => {
            let ack = therapist::complete_session(api, id).await?;
            println!(
                "{} (ended {})",
                ack.message,
                render::format_datetime(&ack.actual_end)
            );
        }
        TherapistCommand::Decision(args) => {
            let recommendation = args.recommendation.to_ascii_lowercase();
            if !RECOMMENDATIONS.contains(&recommendation.as_str()) {
                return Err(eyre::eyre!(
                    "Recommendation must be one of: {}",
                    RECOMMENDATIONS.join(", ")
                ));
            }
            let evaluation = DecisionPointEvaluation {
                treatment_plan_id: args.treatment_plan_id,
                evaluation_criteria: args.criteria,
                recommendation,
                notes: args.notes,
            };
            let ack = therapist::evaluate_decision_point(api, args.decision_point_id, &evaluation).await?;
            println!("{} ({})", ack.message, ack.recommendation);
        }
    }
    Ok(())
}
