//! Command-line definitions for `clinproto`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clinproto_core::models::protocol::{EvidenceLevel, Severity, StepType, TherapyType};
use clinproto_core::models::user::UserRole;

use crate::logging::LogFormat;
use crate::routes::Route;

#[derive(Debug, Parser)]
#[command(
    name = "clinproto",
    version,
    about = "Browse, author, and deliver clinical treatment protocols",
    long_about = "Client for the clinical protocol platform.\n\n\
                  Patients browse protocols, pre-screen, and follow their treatment plans.\n\
                  Clinicians run sessions. Administrators author protocols."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// API base URL (overrides CLINPROTO_API_URL and the config file).
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormat,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session tokens.
    Login(LoginArgs),

    /// Create an account.
    Register(RegisterArgs),

    /// Sign out and forget the stored session.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// List the pages available to the signed-in role.
    Nav,

    /// Browse the protocol catalogue.
    #[command(subcommand)]
    Protocols(ProtocolsCommand),

    /// Check eligibility for a protocol.
    #[command(subcommand)]
    Prescreen(PrescreenCommand),

    /// Your treatment plans.
    #[command(subcommand)]
    Plans(PlansCommand),

    /// Sign the consent form for a treatment plan.
    Consent(ConsentArgs),

    /// Find providers and request consultations.
    #[command(subcommand)]
    Providers(ProvidersCommand),

    /// Clinician workspace.
    #[command(subcommand)]
    Therapist(TherapistCommand),

    /// Protocol authoring.
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Local configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Command {
    /// The page a command corresponds to. Local commands have none.
    pub fn route(&self) -> Option<Route> {
        let route = match self {
            Command::Login(_) => Route::Login,
            Command::Register(_) => Route::Register,
            Command::Whoami => Route::Home,
            Command::Logout | Command::Nav | Command::Config(_) => return None,
            Command::Protocols(cmd) => match cmd {
                ProtocolsCommand::List(_) | ProtocolsCommand::Search { .. } => Route::Protocols,
                ProtocolsCommand::Show { id, .. } => Route::ProtocolDetail(*id),
            },
            Command::Prescreen(cmd) => match cmd {
                PrescreenCommand::Chat { protocol_id } | PrescreenCommand::Quiz { protocol_id } => {
                    Route::PreScreen(*protocol_id)
                }
            },
            Command::Plans(cmd) => match cmd {
                PlansCommand::List => Route::PatientPlans,
                PlansCommand::Show { id } => Route::PatientPlan(*id),
            },
            Command::Consent(args) => Route::PatientPlan(args.plan_id),
            Command::Providers(_) => Route::Providers,
            Command::Therapist(cmd) => match cmd {
                TherapistCommand::Dashboard | TherapistCommand::Decision(_) => {
                    Route::TherapistDashboard
                }
                TherapistCommand::Patients => Route::TherapistPatients,
                TherapistCommand::Patient { id } => Route::TherapistPatient(*id),
                TherapistCommand::Plan(args) => Route::TherapistPatient(args.patient_id),
                TherapistCommand::Session { id } | TherapistCommand::Complete { id } => {
                    Route::TherapistSession(*id)
                }
                TherapistCommand::Vitals(args) => Route::TherapistSession(args.session_id),
                TherapistCommand::Document(args) => Route::TherapistSession(args.session_id),
            },
            Command::Admin(cmd) => match cmd {
                AdminCommand::List => Route::AdminProtocols,
                AdminCommand::Create(_) | AdminCommand::Extract(_) => Route::AdminProtocolNew,
                AdminCommand::Update(args) => Route::AdminProtocolEdit(args.id),
                AdminCommand::Delete { id } | AdminCommand::Publish { id } => {
                    Route::AdminProtocolEdit(*id)
                }
                AdminCommand::AddStep(args) => Route::AdminProtocolEdit(args.protocol_id),
                AdminCommand::UpdateStep(args) => Route::AdminProtocolEdit(args.protocol_id),
                AdminCommand::DeleteStep { protocol_id, .. } => {
                    Route::AdminProtocolEdit(*protocol_id)
                }
                AdminCommand::AddCheck(args) => Route::AdminProtocolEdit(args.protocol_id),
            },
        };
        Some(route)
    }
}

// ── Auth ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    pub email: String,

    /// Read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    pub email: String,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long = "confirm-password")]
    pub confirm_password: Option<String>,

    #[arg(long, default_value = "patient")]
    pub role: UserRole,
}

// ── Patient ─────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ProtocolsCommand {
    /// One page of the catalogue.
    List(ListArgs),

    /// Full-text search.
    Search { query: String },

    /// Protocol detail with its steps.
    Show {
        id: i64,

        /// Also list safety checks under each step.
        #[arg(long)]
        checks: bool,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = 20)]
    pub size: u32,

    #[arg(long = "therapy-type")]
    pub therapy_type: Option<TherapyType>,

    #[arg(long)]
    pub condition: Option<String>,

    #[arg(long = "evidence-level")]
    pub evidence_level: Option<EvidenceLevel>,
}

#[derive(Debug, Subcommand)]
pub enum PrescreenCommand {
    /// Conversational screening, one message per line.
    Chat { protocol_id: i64 },

    /// Fixed questionnaire.
    Quiz { protocol_id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum PlansCommand {
    List,
    Show { id: i64 },
}

#[derive(Debug, Args)]
pub struct ConsentArgs {
    pub plan_id: i64,

    /// Your full name.
    #[arg(long)]
    pub signature: String,

    /// File holding the consent text shown to you.
    #[arg(long = "text-file", value_name = "PATH")]
    pub text_file: Option<PathBuf>,

    /// Confirm that you agree to the consent terms.
    #[arg(long)]
    pub agree: bool,
}

#[derive(Debug, Subcommand)]
pub enum ProvidersCommand {
    /// Search providers.
    Search(ProviderSearchArgs),

    /// Ask a provider for a consultation.
    Consult(ConsultArgs),
}

#[derive(Debug, Args)]
pub struct ProviderSearchArgs {
    #[arg(long)]
    pub location: Option<String>,

    #[arg(long = "therapy-type")]
    pub therapy_type: Option<TherapyType>,

    #[arg(long)]
    pub protocol: Option<String>,

    /// e.g. next_week, next_month
    #[arg(long)]
    pub availability: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConsultArgs {
    pub therapist_id: i64,
    pub protocol_id: i64,

    /// Preferred date, e.g. 2026-03-01T10:00:00.
    #[arg(long = "preferred-date")]
    pub preferred_date: Option<jiff::civil::DateTime>,

    #[arg(long)]
    pub notes: Option<String>,
}

// ── Therapist ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum TherapistCommand {
    /// Today's sessions, pending tasks, and the coming week.
    Dashboard,

    Patients,

    Patient { id: i64 },

    /// Put a patient on a protocol.
    Plan(PlanArgs),

    Session { id: i64 },

    /// Record a vitals reading.
    Vitals(VitalsArgs),

    /// Write session documentation.
    Document(DocumentArgs),

    /// Mark a session complete.
    Complete { id: i64 },

    /// Record a decision-point evaluation.
    Decision(DecisionArgs),
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    pub patient_id: i64,
    pub protocol_id: i64,

    /// Defaults to now.
    #[arg(long = "start-date")]
    pub start_date: Option<jiff::civil::DateTime>,
}

#[derive(Debug, Args)]
pub struct VitalsArgs {
    pub session_id: i64,

    /// e.g. 120/80
    #[arg(long = "bp")]
    pub blood_pressure: Option<String>,

    #[arg(long = "heart-rate")]
    pub heart_rate: Option<i32>,

    /// Fahrenheit.
    #[arg(long)]
    pub temperature: Option<f64>,

    #[arg(long)]
    pub spo2: Option<i32>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct DocumentArgs {
    pub session_id: i64,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub subjective: Option<String>,

    /// Clinical scale scores as a JSON object, e.g. '{"MADRS": 12}'.
    #[arg(long, value_parser = parse_json)]
    pub scales: Option<serde_json::Value>,
}

#[derive(Debug, Args)]
pub struct DecisionArgs {
    pub decision_point_id: i64,

    #[arg(long = "plan")]
    pub treatment_plan_id: i64,

    /// continue, adjust, or discontinue
    #[arg(long)]
    pub recommendation: String,

    /// Evaluation criteria as a JSON object.
    #[arg(long, value_parser = parse_json, default_value = "{}")]
    pub criteria: serde_json::Value,

    #[arg(long)]
    pub notes: Option<String>,
}

// ── Admin ───────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Every protocol, drafts included.
    List,

    Create(CreateArgs),

    Update(UpdateArgs),

    /// Archive a protocol.
    Delete { id: i64 },

    AddStep(StepArgs),

    UpdateStep(StepUpdateArgs),

    DeleteStep { protocol_id: i64, step_id: i64 },

    AddCheck(CheckArgs),

    /// Move a draft to active.
    Publish { id: i64 },

    /// Draft a protocol from research text.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "1.0")]
    pub version: String,

    #[arg(long = "therapy-type")]
    pub therapy_type: TherapyType,

    #[arg(long)]
    pub condition: String,

    #[arg(long = "evidence-level")]
    pub evidence_level: EvidenceLevel,

    #[arg(long)]
    pub overview: Option<String>,

    #[arg(long = "duration-weeks")]
    pub duration_weeks: Option<i32>,

    #[arg(long = "total-sessions")]
    pub total_sessions: Option<i32>,

    /// Repeat for each source.
    #[arg(long = "source")]
    pub sources: Vec<String>,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub version: Option<String>,

    #[arg(long = "therapy-type")]
    pub therapy_type: Option<TherapyType>,

    #[arg(long)]
    pub condition: Option<String>,

    #[arg(long = "evidence-level")]
    pub evidence_level: Option<EvidenceLevel>,

    #[arg(long)]
    pub overview: Option<String>,

    #[arg(long = "duration-weeks")]
    pub duration_weeks: Option<i32>,

    #[arg(long = "total-sessions")]
    pub total_sessions: Option<i32>,
}

#[derive(Debug, Args)]
pub struct StepArgs {
    pub protocol_id: i64,

    #[arg(long = "order")]
    pub sequence_order: i32,

    #[arg(long = "type")]
    pub step_type: StepType,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long = "duration-minutes")]
    pub duration_minutes: Option<i32>,

    #[arg(long = "role")]
    pub required_roles: Vec<String>,

    #[arg(long = "scale")]
    pub clinical_scales: Vec<String>,
}

#[derive(Debug, Args)]
pub struct StepUpdateArgs {
    pub protocol_id: i64,
    pub step_id: i64,

    #[arg(long = "order")]
    pub sequence_order: Option<i32>,

    #[arg(long = "type")]
    pub step_type: Option<StepType>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long = "duration-minutes")]
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    pub protocol_id: i64,
    pub step_id: i64,

    #[arg(long = "check-type")]
    pub check_type: String,

    /// Condition as JSON, e.g. '{"field": "age", "operator": "<", "value": 21}'.
    #[arg(long, value_parser = parse_json)]
    pub condition: serde_json::Value,

    #[arg(long)]
    pub severity: Severity,

    #[arg(long = "override-allowed")]
    pub override_allowed: bool,

    #[arg(long = "evidence-source")]
    pub evidence_source: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// File holding the research text.
    #[arg(value_name = "PATH")]
    pub file: PathBuf,

    #[arg(long = "therapy-type")]
    pub therapy_type: String,

    #[arg(long)]
    pub condition: String,
}

// ── Config ──────────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration.
    Show,

    /// Persist the API base URL.
    SetUrl { url: String },
}

fn parse_json(raw: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}
