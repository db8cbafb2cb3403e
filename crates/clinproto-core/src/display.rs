//! Presentation helpers shared by every front end: badge colours and labels.

use crate::models::protocol::Severity;

/// Background class for a status badge. Accepts any server status string
/// (protocol, treatment, session, risk level). Unknown statuses render grey.
pub fn badge_class(status: &str) -> &'static str {
    match status.trim().to_ascii_lowercase().as_str() {
        "active" | "completed" | "low" | "eligible" => "bg-green-100",
        "draft" | "scheduled" | "screening" | "medium" | "pending" => "bg-yellow-100",
        "in_progress" => "bg-blue-100",
        "paused" => "bg-orange-100",
        "high" | "excluded" | "blocking" | "critical" => "bg-red-100",
        _ => "bg-gray-100",
    }
}

pub fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Blocking => "bg-red-100",
        Severity::Warning => "bg-yellow-100",
        Severity::Info => "bg-blue-100",
    }
}

/// `in_progress` → `In Progress`.
pub fn status_label(status: &str) -> String {
    status
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
