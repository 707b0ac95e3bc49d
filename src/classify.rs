/// Status and score classification
//
// The status label and the numeric score are classified independently. They
// come from separate fields and may disagree; both are surfaced as-is.

use serde::Serialize;

/// Severity tier derived from a status label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
    Secondary,
}

impl Severity {
    /// Badge class used by the dashboard
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
            Severity::Secondary => "secondary",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Success => "healthy",
            Severity::Warning => "moderate",
            Severity::Danger => "critical",
            Severity::Secondary => "unknown",
        }
    }
}

/// Color band derived from the numeric health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    Poor,
    Warning,
    Good,
}

impl HealthBand {
    pub fn hex(self) -> &'static str {
        match self {
            HealthBand::Good => "#28a745",
            HealthBand::Warning => "#ffc107",
            HealthBand::Poor => "#dc3545",
        }
    }
}

/// Total: any label outside the known set maps to `Secondary`.
pub fn status_to_severity_color(status: &str) -> Severity {
    match status {
        "SALUDABLE" => Severity::Success,
        "MODERADO" => Severity::Warning,
        "CRÍTICO" => Severity::Danger,
        _ => Severity::Secondary,
    }
}

/// `>= 70` good, `40..70` warning, `< 40` poor. Lower bounds are inclusive.
pub fn score_to_health_color(score: i64) -> HealthBand {
    if score >= 70 {
        HealthBand::Good
    } else if score >= 40 {
        HealthBand::Warning
    } else {
        HealthBand::Poor
    }
}
