//! Developmental domains.

use serde::{Deserialize, Serialize};

/// One of the six developmental categories a milestone belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Domain {
    /// Large-muscle movement: rolling, sitting, walking
    #[serde(rename = "Gross Motor")]
    GrossMotor,
    /// Hand and finger control
    #[serde(rename = "Fine Motor")]
    FineMotor,
    /// Thinking, problem solving, play
    #[serde(rename = "Cognitive")]
    Cognitive,
    /// Understanding and producing language
    #[serde(rename = "Language & Communication")]
    LanguageCommunication,
    /// Relating to others and regulating emotions
    #[serde(rename = "Social-Emotional")]
    SocialEmotional,
    /// Feeding, dressing and other self-care
    #[serde(rename = "Adaptive/Self-Care")]
    AdaptiveSelfCare,
}

impl Domain {
    /// All domains in display order.
    pub const ALL: [Domain; 6] = [
        Domain::GrossMotor,
        Domain::FineMotor,
        Domain::Cognitive,
        Domain::LanguageCommunication,
        Domain::SocialEmotional,
        Domain::AdaptiveSelfCare,
    ];

    /// Display label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::GrossMotor => "Gross Motor",
            Domain::FineMotor => "Fine Motor",
            Domain::Cognitive => "Cognitive",
            Domain::LanguageCommunication => "Language & Communication",
            Domain::SocialEmotional => "Social-Emotional",
            Domain::AdaptiveSelfCare => "Adaptive/Self-Care",
        }
    }

    /// Short command-line slug.
    pub fn slug(&self) -> &'static str {
        match self {
            Domain::GrossMotor => "gross-motor",
            Domain::FineMotor => "fine-motor",
            Domain::Cognitive => "cognitive",
            Domain::LanguageCommunication => "language",
            Domain::SocialEmotional => "social-emotional",
            Domain::AdaptiveSelfCare => "adaptive",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown domain: {0}")]
pub struct ParseDomainError(pub String);

impl std::str::FromStr for Domain {
    type Err = ParseDomainError;

    /// Accepts slugs, display labels and a few abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let domain = match normalized.as_str() {
            "gross-motor" | "gross motor" | "gm" => Domain::GrossMotor,
            "fine-motor" | "fine motor" | "fm" => Domain::FineMotor,
            "cognitive" | "cog" => Domain::Cognitive,
            "language" | "language & communication" | "lang" => Domain::LanguageCommunication,
            "social-emotional" | "social" | "se" => Domain::SocialEmotional,
            "adaptive" | "adaptive/self-care" | "self-care" | "asc" => Domain::AdaptiveSelfCare,
            _ => return Err(ParseDomainError(s.to_string())),
        };
        Ok(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_display_labels() {
        let json = serde_json::to_string(&Domain::LanguageCommunication).unwrap();
        assert_eq!(json, "\"Language & Communication\"");

        let parsed: Domain = serde_json::from_str("\"Adaptive/Self-Care\"").unwrap();
        assert_eq!(parsed, Domain::AdaptiveSelfCare);
    }

    #[test]
    fn test_parse_slugs_and_labels() {
        for domain in Domain::ALL {
            assert_eq!(domain.slug().parse::<Domain>().unwrap(), domain);
            assert_eq!(domain.as_str().parse::<Domain>().unwrap(), domain);
        }
        assert_eq!("GM".parse::<Domain>().unwrap(), Domain::GrossMotor);
        assert!("motor".parse::<Domain>().is_err());
    }
}
