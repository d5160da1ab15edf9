//! Risk domains, tiers and assessment results.
//!
//! The probability itself comes from the inference service; everything here
//! is the client-side interpretation of it.

use serde::{Deserialize, Serialize};

/// One of the three prediction contexts, each with its own field schema and
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Chronic (coronary) heart disease
    Chd,
    /// Stroke
    Stroke,
    /// Diabetes
    Diabetes,
}

impl Domain {
    /// All domains in menu order.
    pub const ALL: [Domain; 3] = [Domain::Chd, Domain::Stroke, Domain::Diabetes];

    /// Path segment used by the inference service (`/predict/{slug}`).
    #[must_use]
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Chd => "chd",
            Self::Stroke => "stroke",
            Self::Diabetes => "diabetes",
        }
    }

    /// Human-readable title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Chd => "Chronic Heart Disease",
            Self::Stroke => "Stroke",
            Self::Diabetes => "Diabetes",
        }
    }

    /// Condition name as used in sentences ("... risk of developing ...").
    #[must_use]
    pub fn condition(&self) -> &'static str {
        match self {
            Self::Chd => "coronary heart disease",
            Self::Stroke => "stroke",
            Self::Diabetes => "diabetes",
        }
    }

    /// Tier cut points for this domain.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        match self {
            Self::Chd => Thresholds {
                high: 0.7,
                moderate: 0.3,
            },
            Self::Diabetes => Thresholds {
                high: 0.6,
                moderate: 0.3,
            },
            Self::Stroke => Thresholds {
                high: 0.3,
                moderate: 0.1,
            },
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chd" | "heart" => Ok(Self::Chd),
            "stroke" => Ok(Self::Stroke),
            "diabetes" => Ok(Self::Diabetes),
            other => Err(format!(
                "unknown domain '{other}' (expected chd, stroke or diabetes)"
            )),
        }
    }
}

/// Ordered probability cut points. Both comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub high: f64,
    pub moderate: f64,
}

impl Thresholds {
    /// Classify a probability.
    #[must_use]
    pub fn tier(&self, probability: f64) -> RiskTier {
        if probability > self.high {
            RiskTier::High
        } else if probability > self.moderate {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }
}

/// Ordinal risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Short label ("Low", "Moderate", "High").
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    /// Associated RGB color for display.
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129),      // Emerald (#10B981)
            Self::Moderate => (251, 191, 36), // Amber (#FBBF24)
            Self::High => (244, 63, 94),      // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one prediction round-trip. Ephemeral: never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub domain: Domain,

    /// Probability returned by the inference service (0.0 to 1.0)
    pub probability: f64,

    /// Tier derived client-side from `probability`
    pub tier: RiskTier,

    pub assessed_at: chrono::DateTime<chrono::Utc>,
}

impl RiskAssessment {
    /// Build an assessment from a raw probability.
    ///
    /// # Errors
    /// Returns an error if the probability is not a finite value in [0, 1].
    pub fn from_probability(domain: Domain, probability: f64) -> Result<Self, String> {
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(format!("probability {probability} outside [0, 1]"));
        }

        Ok(Self {
            domain,
            probability,
            tier: domain.thresholds().tier(probability),
            assessed_at: chrono::Utc::now(),
        })
    }
}
