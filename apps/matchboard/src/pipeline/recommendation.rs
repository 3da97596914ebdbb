use serde::{Deserialize, Serialize};

/// Recommendation band for a percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl Tier {
    /// Lower edges are inclusive: 80 is excellent, 60 is good, 40 is moderate.
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => Tier::Excellent,
            60..=79 => Tier::Good,
            40..=59 => Tier::Moderate,
            _ => Tier::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::Moderate => "moderate",
            Tier::Low => "low",
        }
    }

    pub fn style_class(self) -> &'static str {
        match self {
            Tier::Excellent => "success",
            Tier::Good => "info",
            Tier::Moderate => "warning",
            Tier::Low => "danger",
        }
    }

    /// Badge class used for the score cell on ranking rows.
    pub fn badge_class(self) -> &'static str {
        match self {
            Tier::Excellent => "score-excellent",
            Tier::Good => "score-good",
            Tier::Moderate => "score-moderate",
            Tier::Low => "score-low",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Tier::Excellent => {
                "Excellent match! This candidate strongly aligns with the job requirements. Highly recommended for interview."
            }
            Tier::Good => {
                "Good match. The candidate meets most requirements with some gaps in specific skills. Consider for interview."
            }
            Tier::Moderate => {
                "Moderate match. The candidate has some relevant skills but is missing several key requirements. May need additional training."
            }
            Tier::Low => {
                "Low match. Significant gaps between candidate skills and job requirements. Not recommended unless other factors compensate."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub tier: Tier,
    pub message: &'static str,
    pub style_class: &'static str,
}

pub fn classify(percentage: u32) -> Recommendation {
    let tier = Tier::from_percentage(percentage);
    Recommendation {
        tier,
        message: tier.message(),
        style_class: tier.style_class(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(classify(100).tier, Tier::Excellent);
        assert_eq!(classify(80).tier, Tier::Excellent);
        assert_eq!(classify(79).tier, Tier::Good);
        assert_eq!(classify(60).tier, Tier::Good);
        assert_eq!(classify(59).tier, Tier::Moderate);
        assert_eq!(classify(40).tier, Tier::Moderate);
        assert_eq!(classify(39).tier, Tier::Low);
        assert_eq!(classify(0).tier, Tier::Low);
    }

    #[test]
    fn test_style_classes() {
        assert_eq!(classify(90).style_class, "success");
        assert_eq!(classify(70).style_class, "info");
        assert_eq!(classify(50).style_class, "warning");
        assert_eq!(classify(10).style_class, "danger");
    }

    #[test]
    fn test_messages_are_fixed_per_tier() {
        assert_eq!(classify(81).message, classify(99).message);
        assert!(classify(85).message.starts_with("Excellent match!"));
        assert!(classify(20).message.starts_with("Low match."));
    }

    #[test]
    fn test_tier_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(classify(45)).unwrap()["tier"],
            serde_json::json!("moderate")
        );
        assert_eq!(Tier::Moderate.as_str(), "moderate");
    }

    #[test]
    fn test_badge_classes() {
        assert_eq!(Tier::from_percentage(80).badge_class(), "score-excellent");
        assert_eq!(Tier::from_percentage(39).badge_class(), "score-low");
    }
}
