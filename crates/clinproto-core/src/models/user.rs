use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::DateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    #[ts(type = "string")]
    pub created_at: DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum UserRole {
    Patient,
    Therapist,
    ClinicAdmin,
    MedicalDirector,
    PlatformAdmin,
}

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::Patient,
        UserRole::Therapist,
        UserRole::ClinicAdmin,
        UserRole::MedicalDirector,
        UserRole::PlatformAdmin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Patient => "patient",
            UserRole::Therapist => "therapist",
            UserRole::ClinicAdmin => "clinic_admin",
            UserRole::MedicalDirector => "medical_director",
            UserRole::PlatformAdmin => "platform_admin",
        }
    }

    /// Roles that work with patients in session (therapist-facing pages).
    pub fn is_clinician(&self) -> bool {
        matches!(
            self,
            UserRole::Therapist | UserRole::ClinicAdmin | UserRole::MedicalDirector
        )
    }

    /// Roles that may author protocols.
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::PlatformAdmin | UserRole::MedicalDirector)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| CoreError::UnknownVariant {
                kind: "user role",
                value: s.to_string(),
            })
    }
}
