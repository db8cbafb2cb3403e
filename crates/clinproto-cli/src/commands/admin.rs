use clinproto_api::services::protocols::ProtocolQuery;
use clinproto_api::services::{admin, ai};
use clinproto_core::models::ai::ProtocolExtractionRequest;
use clinproto_core::models::protocol::{
    ProtocolCreate, ProtocolStepCreate, ProtocolStepUpdate, ProtocolUpdate, SafetyCheckCreate,
};
use clinproto_core::validation::{
    validate_extraction_request, validate_protocol_form, validate_step_form,
};

use super::Context;
use crate::cli::{AdminCommand, CreateArgs, StepArgs, StepUpdateArgs, UpdateArgs};
use crate::render;

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() { None } else { Some(values) }
}

fn create_form(args: CreateArgs) -> ProtocolCreate {
    ProtocolCreate {
        name: args.name,
        version: args.version,
        therapy_type: args.therapy_type,
        condition_treated: args.condition,
        evidence_level: args.evidence_level,
        overview: args.overview,
        duration_weeks: args.duration_weeks,
        total_sessions: args.total_sessions,
        evidence_sources: non_empty(args.sources),
    }
}

fn update_form(args: UpdateArgs) -> ProtocolUpdate {
    ProtocolUpdate {
        name: args.name,
        version: args.version,
        therapy_type: args.therapy_type,
        condition_treated: args.condition,
        evidence_level: args.evidence_level,
        overview: args.overview,
        duration_weeks: args.duration_weeks,
        total_sessions: args.total_sessions,
        evidence_sources: None,
    }
}

fn step_form(args: StepArgs) -> ProtocolStepCreate {
    ProtocolStepCreate {
        sequence_order: args.sequence_order,
        step_type: args.step_type,
        title: args.title,
        description: args.description,
        duration_minutes: args.duration_minutes,
        required_roles: non_empty(args.required_roles),
        clinical_scales: non_empty(args.clinical_scales),
        evaluation_rules: None,
        branch_outcomes: None,
        vitals_monitoring: None,
    }
}

fn step_update_form(args: StepUpdateArgs) -> ProtocolStepUpdate {
    ProtocolStepUpdate {
        sequence_order: args.sequence_order,
        step_type: args.step_type,
        title: args.title,
        description: args.description,
        duration_minutes: args.duration_minutes,
        ..ProtocolStepUpdate::default()
    }
}

pub(super) async fn run(ctx: &Context, cmd: AdminCommand) -> eyre::Result<()> {
    let api = &ctx.api;
    match cmd {
        AdminCommand::List => {
            ctx.store
                .fetch_protocols(api, &ProtocolQuery::default())
                .await?;
            let state = ctx.store.state().protocols;
            println!("{}", render::protocol_table(&state.protocols));
        }
        AdminCommand::Create(args) => {
            let form = create_form(args);
            validate_protocol_form(&form)?;
            let protocol = admin::create_protocol(api, &form).await?;
            println!("Created draft protocol {} ({})", protocol.id, protocol.name);
        }
        AdminCommand::Update(args) => {
            let id = args.id;
            let form = update_form(args);
            if form.is_empty() {
                return Err(eyre::eyre!("Nothing to update"));
            }
            let protocol = admin::update_protocol(api, id, &form).await?;
            println!("Updated protocol {} ({} v{})", protocol.id, protocol.name, protocol.version);
        }
        AdminCommand::Delete { id } => {
            let ack = admin::delete_protocol(api, id).await?;
            ctx.store.clear_selected();
            println!("{}", ack.message);
        }
        AdminCommand::AddStep(args) => {
            let protocol_id = args.protocol_id;
            let form = step_form(args);
            validate_step_form(&form)?;
            let step = admin::add_step(api, protocol_id, &form).await?;
            println!("Added step {} ({}. {})", step.id, step.sequence_order, step.title);
        }
        AdminCommand::UpdateStep(args) => {
            let (protocol_id, step_id) = (args.protocol_id, args.step_id);
            let step = admin::update_step(api, protocol_id, step_id, &step_update_form(args)).await?;
            println!("Updated step {} ({}. {})", step.id, step.sequence_order, step.title);
        }
        AdminCommand::DeleteStep { protocol_id, step_id } => {
            let ack = admin::delete_step(api, protocol_id, step_id).await?;
            println!("{}", ack.message);
        }
        AdminCommand::AddCheck(args) => {
            let form = SafetyCheckCreate {
                check_type: args.check_type,
                condition: args.condition,
                severity: args.severity,
                override_allowed: args.override_allowed,
                override_requirements: None,
                evidence_source: args.evidence_source,
            };
            let check = admin::add_safety_check(api, args.protocol_id, args.step_id, &form).await?;
            println!("Added {} safety check {} to step {}", check.severity, check.id, check.protocol_step_id);
        }
        AdminCommand::Publish { id } => {
            let protocol = admin::publish(api, id).await?;
            println!("Protocol {} is now {}", protocol.id, protocol.status);
        }
        AdminCommand::Extract(args) => {
            let research_text = std::fs::read_to_string(&args.file)
                .map_err(|e| eyre::eyre!("failed to read {}: {e}", args.file.display()))?;
            let request = ProtocolExtractionRequest {
                research_text,
                therapy_type: args.therapy_type,
                condition: args.condition,
            };
            validate_extraction_request(&request)?;

            let extraction = ai::extract_protocol(api, &request).await?;
            let draft = &extraction.extracted_protocol;
            println!(
                "{} v{} ({}, {})",
                draft.name, draft.version, draft.therapy_type, draft.evidence_level
            );
            println!(
                "{} steps, {} safety checks, confidence {:.0}%",
                extraction.steps.len(),
                extraction.safety_checks.len(),
                extraction.extraction_confidence * 100.0
            );
            for warning in extraction.warnings.iter().flatten() {
                println!("warning: {warning}");
            }
            println!("\n{}", serde_json::to_string_pretty(&extraction)?);
        }
    }
    Ok(())
}
