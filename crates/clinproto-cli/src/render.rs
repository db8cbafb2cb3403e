//! Terminal rendering: tables, badges, and the error banner.

use clinproto_api::ApiError;
use clinproto_core::display::{badge_class, severity_class, status_label};
use clinproto_core::models::DateTime;
use clinproto_core::models::patient::{PreScreeningResult, Provider};
use clinproto_core::models::protocol::{Protocol, ProtocolStep};
use clinproto_core::models::therapist::{PatientDetail, PatientTreatmentInfo, TherapistDashboard};
use clinproto_core::models::treatment::{TherapySession, TodaySession, TreatmentPlan, TreatmentPlanDetail};
use clinproto_core::validation::FormErrors;
use clinproto_store::error::ScreeningError;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::routes::NavLink;

const DASH: &str = "-";

/// One-line message for a failed command. API and screening errors use
/// their user-facing text; form errors list every field.
pub fn banner(report: &eyre::Report) -> String {
    if let Some(e) = report.downcast_ref::<ApiError>() {
        return e.user_message();
    }
    if let Some(e) = report.downcast_ref::<ScreeningError>() {
        return e.user_message();
    }
    if let Some(errors) = report.downcast_ref::<FormErrors>() {
        return form_errors(errors);
    }
    report.to_string()
}

pub fn form_errors(errors: &FormErrors) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn badge_color(status: &str) -> Color {
    match badge_class(status) {
        "bg-green-100" => Color::Green,
        "bg-yellow-100" => Color::Yellow,
        "bg-blue-100" => Color::Blue,
        "bg-orange-100" => Color::DarkYellow,
        "bg-red-100" => Color::Red,
        _ => Color::Grey,
    }
}

pub fn badge_cell(status: &str) -> Cell {
    Cell::new(status_label(status))
        .fg(badge_color(status))
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).add_attribute(Attribute::Dim)
}

fn opt_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(v) => Cell::new(v),
        None => dim_cell(DASH),
    }
}

pub fn format_datetime(dt: &DateTime) -> String {
    dt.strftime("%Y-%m-%d %H:%M").to_string()
}

fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| header_cell(h)).collect::<Vec<_>>());
    table
}

fn align_right(table: &mut Table, index: usize) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(CellAlignment::Right);
    }
}

// ── Protocols ───────────────────────────────────────────────────────────────

pub fn protocol_table(protocols: &[Protocol]) -> Table {
    let mut t = table(&["ID", "Name", "Version", "Therapy", "Condition", "Evidence", "Status"]);
    align_right(&mut t, 0);
    for p in protocols {
        t.add_row(vec![
            Cell::new(p.id),
            Cell::new(&p.name),
            Cell::new(&p.version),
            Cell::new(status_label(&p.therapy_type.to_string())),
            Cell::new(&p.condition_treated),
            Cell::new(status_label(&p.evidence_level.to_string())),
            badge_cell(p.status.as_str()),
        ]);
    }
    t
}

pub fn protocol_summary(protocol: &Protocol) -> String {
    let mut lines = vec![
        format!("{} (v{})", protocol.name, protocol.version),
        format!(
            "{} · {} · {}",
            status_label(&protocol.therapy_type.to_string()),
            protocol.condition_treated,
            status_label(&protocol.evidence_level.to_string()),
        ),
        format!("Status: {}", status_label(protocol.status.as_str())),
    ];
    if let Some(weeks) = protocol.duration_weeks {
        lines.push(format!("Duration: {weeks} weeks"));
    }
    if let Some(sessions) = protocol.total_sessions {
        lines.push(format!("Sessions: {sessions}"));
    }
    if let Some(overview) = &protocol.overview {
        lines.push(String::new());
        lines.push(overview.clone());
    }
    if let Some(sources) = protocol.evidence_sources.as_ref().filter(|s| !s.is_empty()) {
        lines.push(String::new());
        lines.push("Evidence:".to_string());
        lines.extend(sources.iter().map(|s| format!("- {s}")));
    }
    lines.join("\n")
}

pub fn step_table(steps: &[&ProtocolStep]) -> Table {
    let mut t = table(&["#", "Type", "Title", "Minutes", "Blocking checks"]);
    align_right(&mut t, 0);
    align_right(&mut t, 3);
    for step in steps {
        let blocking = step.blocking_checks().count();
        t.add_row(vec![
            Cell::new(step.sequence_order),
            Cell::new(status_label(&step.step_type.to_string())),
            Cell::new(&step.title),
            opt_cell(step.duration_minutes),
            if blocking > 0 {
                Cell::new(blocking).fg(Color::Red).add_attribute(Attribute::Bold)
            } else {
                dim_cell(0)
            },
        ]);
    }
    t
}

pub fn safety_check_table(step: &ProtocolStep) -> Table {
    let mut t = table(&["Check", "Severity", "Override", "Source"]);
    for check in &step.safety_checks {
        let color = match severity_class(check.severity) {
            "bg-red-100" => Color::Red,
            "bg-yellow-100" => Color::Yellow,
            _ => Color::Blue,
        };
        t.add_row(vec![
            Cell::new(&check.check_type),
            Cell::new(status_label(&check.severity.to_string())).fg(color),
            Cell::new(if check.override_allowed { "yes" } else { "no" }),
            opt_cell(check.evidence_source.as_deref()),
        ]);
    }
    t
}

// ── Patient ─────────────────────────────────────────────────────────────────

pub fn verdict(result: &PreScreeningResult) -> String {
    let mut lines = vec![
        format!(
            "Eligible: {}",
            if result.eligible { "yes" } else { "no" }
        ),
        format!("Risk level: {}", status_label(result.risk_level.as_str())),
    ];
    if !result.contraindications.is_empty() {
        lines.push("Contraindications:".to_string());
        lines.extend(result.contraindications.iter().map(|c| format!("- {c}")));
    }
    if !result.recommendations.is_empty() {
        lines.push("Recommendations:".to_string());
        lines.extend(result.recommendations.iter().map(|r| format!("- {r}")));
    }
    lines.join("\n")
}

pub fn plan_table(plans: &[TreatmentPlan]) -> Table {
    let mut t = table(&["ID", "Protocol", "Therapist", "Clinic", "Started", "Status"]);
    align_right(&mut t, 0);
    for plan in plans {
        t.add_row(vec![
            Cell::new(plan.id),
            Cell::new(format!("{} v{}", plan.protocol_name, plan.protocol_version)),
            Cell::new(&plan.therapist_name),
            opt_cell(plan.clinic_name.as_deref()),
            Cell::new(format_datetime(&plan.start_date)),
            badge_cell(plan.status.as_str()),
        ]);
    }
    t
}

pub fn plan_detail(plan: &TreatmentPlanDetail) -> String {
    let mut lines = vec![
        format!("{} v{}", plan.protocol_name, plan.protocol_version),
        format!("Therapist: {}", plan.therapist_name),
        format!("Status: {}", status_label(plan.status.as_str())),
        format!("Progress: {}%", plan.progress_percent()),
    ];
    if let Some(next) = plan.next_session() {
        lines.push(format!(
            "Next session: {} at {}",
            format_datetime(&next.scheduled_at),
            next.location
        ));
    }
    lines.join("\n")
}

pub fn plan_sessions_table(plan: &TreatmentPlanDetail) -> Table {
    let mut t = table(&["ID", "Scheduled", "Location", "Status"]);
    align_right(&mut t, 0);
    for session in &plan.sessions {
        t.add_row(vec![
            Cell::new(session.id),
            Cell::new(format_datetime(&session.scheduled_at)),
            Cell::new(&session.location),
            badge_cell(session.status.as_str()),
        ]);
    }
    t
}

pub fn provider_table(providers: &[Provider]) -> Table {
    let mut t = table(&["Therapist ID", "Email", "License", "Specialties", "Clinic"]);
    align_right(&mut t, 0);
    for provider in providers {
        let therapist = &provider.therapist;
        t.add_row(vec![
            Cell::new(therapist.id),
            Cell::new(&therapist.email),
            Cell::new(format!("{} ({})", therapist.license_type, therapist.license_state)),
            opt_cell(therapist.specialties.as_ref().map(|s| s.join(", "))),
            opt_cell(provider.clinic.as_ref().map(|c| c.name.as_str())),
        ]);
    }
    t
}

// ── Therapist ───────────────────────────────────────────────────────────────

pub fn dashboard_summary(dashboard: &TherapistDashboard) -> String {
    format!(
        "Active patients: {}   Upcoming sessions: {}   Pending tasks: {}",
        dashboard.active_patients_count,
        dashboard.upcoming_sessions_count,
        dashboard.pending_tasks.len()
    )
}

pub fn session_list_table(sessions: &[TodaySession]) -> Table {
    let mut t = table(&["ID", "Time", "Patient", "Step", "Location", "Status"]);
    align_right(&mut t, 0);
    for s in sessions {
        t.add_row(vec![
            Cell::new(s.id),
            Cell::new(format_datetime(&s.scheduled_at)),
            Cell::new(&s.patient_email),
            Cell::new(&s.step_title),
            Cell::new(&s.location),
            badge_cell(&s.status),
        ]);
    }
    t
}

pub fn task_table(dashboard: &TherapistDashboard) -> Table {
    let mut t = table(&["Task", "Description", "Priority", "Due"]);
    for task in &dashboard.pending_tasks {
        let priority = match task.priority.as_str() {
            "high" => Cell::new("High").fg(Color::Red),
            "medium" => Cell::new("Medium").fg(Color::Yellow),
            other => Cell::new(status_label(other)),
        };
        t.add_row(vec![
            Cell::new(status_label(&task.task_type)),
            Cell::new(&task.description),
            priority,
            opt_cell(task.due_date.as_ref().map(format_datetime)),
        ]);
    }
    t
}

pub fn patient_table(patients: &[PatientTreatmentInfo]) -> Table {
    let mut t = table(&["ID", "Email", "Protocol", "Next session", "Status"]);
    align_right(&mut t, 0);
    for p in patients {
        t.add_row(vec![
            Cell::new(p.id),
            Cell::new(&p.email),
            opt_cell(p.protocol_name.as_deref()),
            opt_cell(p.next_session.as_ref().map(format_datetime)),
            match p.treatment_status.as_deref() {
                Some(status) => badge_cell(status),
                None => dim_cell(DASH),
            },
        ]);
    }
    t
}

pub fn patient_detail(patient: &PatientDetail) -> String {
    let mut lines = vec![format!("{} <{}>", patient.full_name, patient.email)];
    if let Some(dob) = &patient.date_of_birth {
        lines.push(format!("Born: {}", dob.date()));
    }
    if let Some(meds) = patient.medications.as_ref().filter(|m| !m.is_empty()) {
        lines.push(format!("Medications: {}", meds.join(", ")));
    }
    if let Some(contra) = patient.contraindications.as_ref().filter(|c| !c.is_empty()) {
        lines.push(format!("Contraindications: {}", contra.join(", ")));
    }
    lines.push(format!(
        "Treatment plans: {}   Sessions on record: {}",
        patient.treatment_plans.len(),
        patient.session_history.len()
    ));
    lines.join("\n")
}

pub fn session_detail(session: &TherapySession) -> String {
    let mut lines = vec![
        format!("Session {}: {}", session.id, session.step_title),
        format!("Patient: {}", session.patient_email),
        format!(
            "Scheduled: {} at {}",
            format_datetime(&session.scheduled_at),
            session.location
        ),
        format!("Status: {}", status_label(session.status.as_str())),
    ];
    if let Some(start) = &session.actual_start {
        lines.push(format!("Started: {}", format_datetime(start)));
    }
    if let Some(end) = &session.actual_end {
        lines.push(format!("Ended: {}", format_datetime(end)));
    }
    if let Some(description) = &session.step_description {
        lines.push(String::new());
        lines.push(description.clone());
    }
    let readings = session.vitals.as_ref().map_or(0, Vec::len);
    lines.push(format!("Vitals readings: {readings}"));
    lines.push(format!(
        "Documentation: {}",
        if session.documentation.is_some() { "written" } else { "missing" }
    ));
    lines.join("\n")
}

// ── Navigation ──────────────────────────────────────────────────────────────

pub fn nav_table(links: &[NavLink]) -> Table {
    let mut t = table(&["Page", "Path"]);
    for link in links {
        t.add_row(vec![Cell::new(link.label), dim_cell(link.route.path())]);
    }
    t
}
