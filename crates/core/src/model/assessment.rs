use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::{Algorithm, SubjectId};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error("confidence {tenths} is outside [{min}, {max})", min = Confidence::MIN_TENTHS, max = Confidence::MAX_TENTHS)]
    ConfidenceOutOfRange { tenths: u16 },
}

/// Every simulated assessment lands on the medium band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum RiskLevel {
    Medium,
}

impl RiskLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Medium => "中等风险",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Model confidence, stored in tenths of a percent.
///
/// Only values in `[85.0%, 95.0%)` are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Confidence(u16);

impl Confidence {
    pub const MIN_TENTHS: u16 = 850;
    /// Exclusive upper bound.
    pub const MAX_TENTHS: u16 = 950;

    /// # Errors
    ///
    /// Returns `AssessmentError::ConfidenceOutOfRange` outside `[850, 950)`.
    pub fn from_tenths(tenths: u16) -> Result<Self, AssessmentError> {
        if (Self::MIN_TENTHS..Self::MAX_TENTHS).contains(&tenths) {
            Ok(Self(tenths))
        } else {
            Err(AssessmentError::ConfidenceOutOfRange { tenths })
        }
    }

    /// Clamps `tenths` into the representable range.
    #[must_use]
    pub fn saturating(tenths: u16) -> Self {
        Self(tenths.clamp(Self::MIN_TENTHS, Self::MAX_TENTHS - 1))
    }

    #[must_use]
    pub fn tenths(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn percent(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}%", self.0 / 10, self.0 % 10)
    }
}

/// Outcome of a completed inference run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    subject: SubjectId,
    algorithm: Algorithm,
    level: RiskLevel,
    confidence: Confidence,
    assessed_at: DateTime<Utc>,
    narrative: String,
}

impl RiskAssessment {
    /// Builds the assessment the simulated pipeline always reports: a medium
    /// risk with the hub-and-spoke narrative for `subject`.
    #[must_use]
    pub fn simulated(
        subject: SubjectId,
        algorithm: Algorithm,
        confidence: Confidence,
        assessed_at: DateTime<Utc>,
    ) -> Self {
        let narrative = hub_narrative(&subject);
        Self {
            subject,
            algorithm,
            level: RiskLevel::Medium,
            confidence,
            assessed_at,
            narrative,
        }
    }

    #[must_use]
    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[must_use]
    pub fn level(&self) -> RiskLevel {
        self.level
    }

    #[must_use]
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    #[must_use]
    pub fn assessed_at(&self) -> DateTime<Utc> {
        self.assessed_at
    }

    #[must_use]
    pub fn narrative(&self) -> &str {
        &self.narrative
    }
}

fn hub_narrative(subject: &SubjectId) -> String {
    format!(
        "账户 {subject} 在图谱中表现出明显的“中心放射型”关联，与已知逾期名单存在二度关联，建议通过人工电话进一步核实用途。"
    )
}
