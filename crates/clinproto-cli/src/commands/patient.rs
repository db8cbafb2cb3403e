use clinproto_api::services::protocols::ProtocolQuery;
use clinproto_api::services::{patients, protocols};
use clinproto_core::models::chat::{ChatMessage, ChatRole};
use clinproto_core::models::patient::{ConsentRequest, ConsultationRequest, ProviderSearchFilters};
use clinproto_core::validation::validate_consent;
use clinproto_store::error::ScreeningError;
use clinproto_store::screening::{ChatOutcome, PreScreenQuiz, ScreeningChat};
use tracing::info;

use super::{Context, Input};
use crate::cli::{
    ConsentArgs, PlansCommand, PrescreenCommand, ProtocolsCommand, ProvidersCommand,
};
use crate::render;

const DEFAULT_CONSENT_TEXT: &str = "I agree to participate in this treatment protocol and \
understand the risks, benefits, and alternatives explained to me.";

// ── Protocols ───────────────────────────────────────────────────────────────

pub(super) async fn protocols(ctx: &Context, cmd: ProtocolsCommand) -> eyre::Result<()> {
    match cmd {
        ProtocolsCommand::List(args) => {
            let query = ProtocolQuery {
                page: Some(args.page),
                size: Some(args.size),
                therapy_type: args.therapy_type,
                condition: args.condition,
                evidence_level: args.evidence_level,
            };
            ctx.store.fetch_protocols(&ctx.api, &query).await?;
            print_catalogue(ctx);
        }
        ProtocolsCommand::Search { query } => {
            ctx.store.search_protocols(&ctx.api, &query).await?;
            print_catalogue(ctx);
        }
        ProtocolsCommand::Show { id, checks } => {
            let mut protocol = ctx.store.select_protocol(&ctx.api, id).await?;
            if protocol.steps.is_none() {
                protocol.steps = Some(protocols::steps(&ctx.api, id).await?);
            }

            println!("{}", render::protocol_summary(&protocol));
            let steps = protocol.ordered_steps();
            if steps.is_empty() {
                println!("\nNo steps defined yet.");
                return Ok(());
            }
            println!("\n{}", render::step_table(&steps));

            if checks {
                for step in steps.iter().filter(|s| !s.safety_checks.is_empty()) {
                    println!("\n{}. {}", step.sequence_order, step.title);
                    println!("{}", render::safety_check_table(step));
                }
            }
        }
    }
    Ok(())
}

fn print_catalogue(ctx: &Context) {
    let state = ctx.store.state().protocols;
    if state.protocols.is_empty() {
        println!("No protocols found.");
        return;
    }
    println!("{}", render::protocol_table(&state.protocols));
    println!("Showing {} of {}", state.protocols.len(), state.total);
}

// ── Pre-screening ───────────────────────────────────────────────────────────

pub(super) async fn prescreen(ctx: &Context, cmd: PrescreenCommand) -> eyre::Result<()> {
    match cmd {
        PrescreenCommand::Chat { protocol_id } => chat(ctx, protocol_id).await,
        PrescreenCommand::Quiz { protocol_id } => quiz(ctx, protocol_id).await,
    }
}

fn print_message(message: &ChatMessage) {
    match message.role {
        ChatRole::Assistant => println!("assistant> {}", message.content),
        ChatRole::User => println!("you> {}", message.content),
    }
}

async fn chat(ctx: &Context, protocol_id: i64) -> eyre::Result<()> {
    let mut chat = ScreeningChat::open(ctx.api.clone(), protocol_id).await?;
    for message in chat.messages() {
        print_message(message);
    }
    println!("(type /quit to leave)");

    let mut input = Input::stdin();
    loop {
        let Some(line) = input.line("you> ").await? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }

        match chat.send(&line).await {
            Ok(ChatOutcome::Ignored) => {}
            Ok(ChatOutcome::InProgress) => {
                if let Some(reply) = chat.messages().last() {
                    print_message(reply);
                }
            }
            Ok(ChatOutcome::Completed(result)) => {
                if let Some(reply) = chat.messages().last() {
                    print_message(reply);
                }
                println!();
                match chat.verdict() {
                    Some(Ok(verdict)) => println!("{}", render::verdict(&verdict)),
                    _ => println!("{}", serde_json::to_string_pretty(&result)?),
                }
                return Ok(());
            }
            Err(ScreeningError::Abandoned) => {
                if let Some(reply) = chat.messages().last() {
                    print_message(reply);
                }
                return Err(ScreeningError::Abandoned.into());
            }
            // The message stays in the transcript; the user may type again.
            Err(e) => eprintln!("error: {}", e.user_message()),
        }
    }

    info!(session_id = chat.session_id(), "screening chat left before completion");
    Ok(())
}

async fn quiz(ctx: &Context, protocol_id: i64) -> eyre::Result<()> {
    let mut quiz = PreScreenQuiz::new(protocol_id);
    let mut input = Input::stdin();

    for question in quiz.questions() {
        loop {
            let Some(raw) = input.line(&format!("{} ", question.prompt)).await? else {
                return Err(eyre::eyre!("input closed before the questionnaire was finished"));
            };
            match quiz.answer(question.key, &raw) {
                Ok(()) => break,
                Err(e) => eprintln!("{}", e.user_message()),
            }
        }
    }

    let verdict = quiz.submit(&ctx.api).await?;
    println!("\n{}", render::verdict(verdict));
    Ok(())
}

// ── Treatment plans ─────────────────────────────────────────────────────────

pub(super) async fn plans(ctx: &Context, cmd: PlansCommand) -> eyre::Result<()> {
    match cmd {
        PlansCommand::List => {
            let plans = patients::treatment_plans(&ctx.api).await?;
            if plans.is_empty() {
                println!("You have no treatment plans yet.");
            } else {
                println!("{}", render::plan_table(&plans));
            }
        }
        PlansCommand::Show { id } => {
            let plan = patients::treatment_plan(&ctx.api, id).await?;
            println!("{}", render::plan_detail(&plan));
            if !plan.sessions.is_empty() {
                println!("\n{}", render::plan_sessions_table(&plan));
            }
        }
    }
    Ok(())
}

pub(super) async fn consent(ctx: &Context, args: ConsentArgs) -> eyre::Result<()> {
    let consent_text = match &args.text_file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?,
        None => DEFAULT_CONSENT_TEXT.to_string(),
    };
    let request = ConsentRequest {
        treatment_plan_id: args.plan_id,
        consent_text,
        signature: args.signature,
        agreed: args.agree,
    };
    validate_consent(&request)?;

    let record = patients::sign_consent(&ctx.api, &request).await?;
    println!(
        "Consent {} signed by {} at {}",
        record.consent_version,
        record.signature,
        render::format_datetime(&record.signed_at)
    );
    Ok(())
}

// ── Providers ───────────────────────────────────────────────────────────────

pub(super) async fn providers(ctx: &Context, cmd: ProvidersCommand) -> eyre::Result<()> {
    match cmd {
        ProvidersCommand::Search(args) => {
            let filters = ProviderSearchFilters {
                location: args.location,
                therapy_type: args.therapy_type,
                protocol: args.protocol,
                availability: args.availability,
            };
            let found = patients::search_providers(&ctx.api, &filters).await?;
            if found.is_empty() {
                println!("No providers match these filters.");
            } else {
                println!("{}", render::provider_table(&found));
            }
        }
        ProvidersCommand::Consult(args) => {
            let request = ConsultationRequest {
                therapist_id: args.therapist_id,
                protocol_id: args.protocol_id,
                preferred_date: args.preferred_date,
                notes: args.notes,
            };
            let ack = patients::request_consultation(&ctx.api, &request).await?;
            println!("{} (consultation {}, {})", ack.message, ack.consultation_id, ack.status);
        }
    }
    Ok(())
}
