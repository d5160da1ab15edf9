//! Result Presenter: maps a classified assessment to display copy.

use crate::domain::{Domain, RiskTier};

/// Shown alongside every form and result.
pub const DISCLAIMER: &str = "This tool provides an estimate based on the information you provide \
     and should not be considered a medical diagnosis. Always consult with healthcare \
     professionals for proper medical advice.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPresentation {
    /// Domain glyph, tinted with `color`
    pub icon: &'static str,
    pub color: (u8, u8, u8),
    pub title: String,
    /// `"{Tier} Risk"`
    pub headline: String,
    pub explanation: String,
}

/// Short name used in headings ("Your CHD Risk Assessment").
#[must_use]
pub fn short_name(domain: Domain) -> &'static str {
    match domain {
        Domain::Chd => "CHD",
        Domain::Stroke => "Stroke",
        Domain::Diabetes => "Diabetes",
    }
}

#[must_use]
pub fn icon(domain: Domain) -> &'static str {
    match domain {
        Domain::Chd => "♥",
        Domain::Stroke => "◉",
        Domain::Diabetes => "◆",
    }
}

#[must_use]
pub fn present(domain: Domain, tier: RiskTier) -> ResultPresentation {
    ResultPresentation {
        icon: icon(domain),
        color: tier.color(),
        title: format!("Your {} Risk Assessment", short_name(domain)),
        headline: format!("{tier} Risk"),
        explanation: explanation(domain, tier),
    }
}

fn explanation(domain: Domain, tier: RiskTier) -> String {
    let condition = domain.condition();
    // Stroke is "experienced", the chronic conditions are "developed".
    let outcome = match domain {
        Domain::Stroke => "experiencing a stroke".to_string(),
        Domain::Chd | Domain::Diabetes => format!("developing {condition}"),
    };

    match tier {
        RiskTier::High => format!(
            "A high risk assessment suggests you may have an elevated risk of {outcome}. \
             It's recommended to consult with a healthcare professional for a thorough evaluation."
        ),
        RiskTier::Moderate => format!(
            "A moderate risk assessment suggests you have some risk factors for {condition}. \
             Consider discussing these results with your healthcare provider during your next visit."
        ),
        RiskTier::Low => format!(
            "A low risk assessment suggests you currently have a lower risk of {outcome}. \
             Continue maintaining a healthy lifestyle to keep your risk low."
        ),
    }
}

/// `"Estimated probability: 42.0%"`
#[must_use]
pub fn probability_label(probability: f64) -> String {
    format!("Estimated probability: {:.1}%", probability * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_and_color() {
        let p = present(Domain::Chd, RiskTier::High);
        assert_eq!(p.headline, "High Risk");
        assert_eq!(p.title, "Your CHD Risk Assessment");
        assert_eq!(p.color, RiskTier::High.color());
        assert_eq!(p.icon, "♥");
    }

    #[test]
    fn test_explanations() {
        assert!(present(Domain::Chd, RiskTier::High)
            .explanation
            .starts_with("A high risk assessment suggests you may have an elevated risk of developing coronary heart disease."));
        assert!(present(Domain::Stroke, RiskTier::Low)
            .explanation
            .contains("lower risk of experiencing a stroke."));
        assert!(present(Domain::Diabetes, RiskTier::Moderate)
            .explanation
            .contains("some risk factors for diabetes."));
    }

    #[test]
    fn test_probability_label() {
        assert_eq!(probability_label(0.42), "Estimated probability: 42.0%");
        assert_eq!(probability_label(0.0567), "Estimated probability: 5.7%");
    }
}
