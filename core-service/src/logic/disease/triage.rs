//! Triage Types
//!
//! Emergency vs standard, and the contact guidance shown for each.

use serde::{Deserialize, Serialize};

use super::catalog::Severity;
use crate::constants::{CLINIC_MAP_URL, VET_PHONE};

// ============================================================================
// TRIAGE
// ============================================================================

/// Binary triage decision derived from the predicted disease
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Triage {
    /// Acute or highly contagious: see a vet now
    Emergency,
    /// Call a vet when convenient
    Standard,
}

impl Triage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Triage::Emergency => "emergency",
            Triage::Standard => "standard",
        }
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, Triage::Emergency)
    }
}

impl From<Severity> for Triage {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Emergency => Triage::Emergency,
            Severity::Standard => Triage::Standard,
        }
    }
}

impl std::fmt::Display for Triage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CONTACT GUIDANCE
// ============================================================================

/// What the contact panel shows for a triage decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactGuidance {
    pub triage: Triage,
    pub title: &'static str,
    pub alert: &'static str,
    pub phone: &'static str,
    pub map_url: &'static str,
    /// Panel starts open
    pub expanded: bool,
}

impl ContactGuidance {
    pub fn for_triage(triage: Triage) -> Self {
        match triage {
            Triage::Emergency => Self {
                triage,
                title: "📞 Contact an emergency veterinarian",
                alert: "🚨 High priority! Take your pet to a veterinarian immediately!",
                phone: VET_PHONE,
                map_url: CLINIC_MAP_URL,
                expanded: true,
            },
            Triage::Standard => Self {
                triage,
                title: "📞 Contact a veterinarian",
                alert: "🤷 No critical condition identified. Please call a veterinarian.",
                phone: VET_PHONE,
                map_url: CLINIC_MAP_URL,
                expanded: false,
            },
        }
    }

    /// Guidance for the standalone emergency page
    pub fn emergency() -> Self {
        Self::for_triage(Triage::Emergency)
    }
}
