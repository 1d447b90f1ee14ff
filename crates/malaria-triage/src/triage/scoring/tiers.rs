use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    #[serde(rename = "VERY HIGH")]
    VeryHigh,
}

struct TierProfile {
    level: RiskLevel,
    /// Exclusive upper score bound; `None` for the top tier.
    below: Option<u8>,
    label: &'static str,
    color: &'static str,
    recommendation: &'static str,
}

const TIERS: [TierProfile; 4] = [
    TierProfile {
        level: RiskLevel::Low,
        below: Some(25),
        label: "LOW",
        color: "#34C759",
        recommendation: "Simple outpatient consultation recommended. Monitor symptoms.",
    },
    TierProfile {
        level: RiskLevel::Moderate,
        below: Some(50),
        label: "MODERATE",
        color: "#FFC107",
        recommendation: "Medical consultation recommended within 24 hours. Rapid diagnostic test (RDT) advised.",
    },
    TierProfile {
        level: RiskLevel::High,
        below: Some(75),
        label: "HIGH",
        color: "#FF9500",
        recommendation: "URGENT medical consultation required. Immediate care needed.",
    },
    TierProfile {
        level: RiskLevel::VeryHigh,
        below: None,
        label: "VERY HIGH",
        color: "#FF3B30",
        recommendation: "IMMEDIATE EMERGENCY - Signs of severe malaria. Hospitalisation required.",
    },
];

impl RiskLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Low, Self::Moderate, Self::High, Self::VeryHigh]
    }

    /// First tier whose bound lies above `score`.
    pub fn from_score(score: u8) -> Self {
        TIERS
            .iter()
            .find(|tier| tier.below.map_or(true, |bound| score < bound))
            .map(|tier| tier.level)
            .unwrap_or(Self::VeryHigh)
    }

    fn profile(self) -> &'static TierProfile {
        &TIERS[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.profile().label
    }

    pub fn color(self) -> &'static str {
        self.profile().color
    }

    pub fn recommendation(self) -> &'static str {
        self.profile().recommendation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_table_lines_up_with_variants() {
        for (index, level) in RiskLevel::ordered().into_iter().enumerate() {
            assert_eq!(TIERS[index].level, level);
        }
    }

    #[test]
    fn boundaries_belong_to_the_higher_tier() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(24), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(25), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(49), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(50), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(74), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(75), RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::VeryHigh);
    }

    #[test]
    fn wire_names_match_display_labels() {
        for level in RiskLevel::ordered() {
            let wire = serde_json::to_value(level).expect("level serializes");
            assert_eq!(wire, serde_json::Value::from(level.label()));
            let parsed: RiskLevel = serde_json::from_value(wire).expect("level parses");
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn very_high_tier_carries_emergency_guidance() {
        assert_eq!(RiskLevel::VeryHigh.label(), "VERY HIGH");
        assert_eq!(RiskLevel::VeryHigh.color(), "#FF3B30");
        assert!(RiskLevel::VeryHigh
            .recommendation()
            .contains("Hospitalisation required"));
    }
}
