// Audience tiers derived from follower count.

use serde::{Deserialize, Serialize};

/// Follower counts at which each tier starts.
pub const MICRO_THRESHOLD: u64 = 10_000;
pub const MACRO_THRESHOLD: u64 = 100_000;
pub const MEGA_THRESHOLD: u64 = 1_000_000;

/// Audience size bucket, ordered smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Nano,
    Micro,
    Macro,
    Mega,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Nano, Tier::Micro, Tier::Macro, Tier::Mega];

    /// Classify a follower count.
    pub fn from_followers(followers: u64) -> Self {
        match followers {
            n if n >= MEGA_THRESHOLD => Tier::Mega,
            n if n >= MACRO_THRESHOLD => Tier::Macro,
            n if n >= MICRO_THRESHOLD => Tier::Micro,
            _ => Tier::Nano,
        }
    }

    /// Classify an untrusted count. Negative, NaN and infinite inputs
    /// count as zero followers.
    pub fn classify(followers: f64) -> Self {
        if !followers.is_finite() || followers <= 0.0 {
            return Tier::Nano;
        }
        // `as` saturates at u64::MAX, which is still Mega.
        Tier::from_followers(followers as u64)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Nano => "nano",
            Tier::Micro => "micro",
            Tier::Macro => "macro",
            Tier::Mega => "mega",
        }
    }

    /// Parse a tier label, ignoring case. Unknown labels are `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "nano" => Some(Tier::Nano),
            "micro" => Some(Tier::Micro),
            "macro" => Some(Tier::Macro),
            "mega" => Some(Tier::Mega),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
