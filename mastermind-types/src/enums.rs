use serde::{Deserialize, Serialize};

/// Voice a persona comments in, derived from its bio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Sales,
    Ops,
    Pm,
    Consult,
    #[default]
    General,
}

impl Tone {
    /// Classify a persona bio. Rules are checked in order and the first
    /// case-insensitive substring hit wins.
    pub fn from_bio(bio: Option<&str>) -> Self {
        let bio = bio.unwrap_or_default().to_lowercase();
        if bio.contains("sales") {
            Tone::Sales
        } else if bio.contains("operations") {
            Tone::Ops
        } else if bio.contains("product") {
            Tone::Pm
        } else if bio.contains("consultant") {
            Tone::Consult
        } else {
            Tone::General
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Sales => "sales",
            Tone::Ops => "ops",
            Tone::Pm => "pm",
            Tone::Consult => "consult",
            Tone::General => "general",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sales" => Some(Tone::Sales),
            "ops" => Some(Tone::Ops),
            "pm" => Some(Tone::Pm),
            "consult" => Some(Tone::Consult),
            "general" => Some(Tone::General),
            _ => None,
        }
    }
}

/// Failure categories reported by the generate trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorCategory {
    NoCompanyFound,
    MissingInputs,
    StoreError,
}
