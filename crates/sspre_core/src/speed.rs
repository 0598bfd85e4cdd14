//! Playback speed codes stored as the `s:<code>` metadata token.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const NORMAL_LABEL: &str = "Normal (1.0)";

struct SpeedEntry {
    label: &'static str,
    code: &'static str,
    display_multiplier: f64,
}

#[rustfmt::skip]
const SPEED_TABLE: &[SpeedEntry] = &[
    SpeedEntry { label: NORMAL_LABEL,        code: "=",    display_multiplier: 1.0 },
    SpeedEntry { label: "Speed --- (0.75)",  code: "---",  display_multiplier: 0.75 },
    SpeedEntry { label: "Speed -- (0.8)",    code: "--",   display_multiplier: 0.8 },
    SpeedEntry { label: "Speed - (0.85)",    code: "-",    display_multiplier: 0.85 },
    SpeedEntry { label: "Speed + (1.15)",    code: "+",    display_multiplier: 1.15 },
    SpeedEntry { label: "Speed ++ (1.25)",   code: "++",   display_multiplier: 1.25 },
    SpeedEntry { label: "Speed +++ (1.35)",  code: "+++",  display_multiplier: 1.35 },
    SpeedEntry { label: "Speed ++++ (1.45)", code: "++++", display_multiplier: 1.45 },
];

/// Labels in display order.
pub const SPEED_LABELS: [&str; 8] = [
    NORMAL_LABEL,
    "Speed --- (0.75)",
    "Speed -- (0.8)",
    "Speed - (0.85)",
    "Speed + (1.15)",
    "Speed ++ (1.25)",
    "Speed +++ (1.35)",
    "Speed ++++ (1.45)",
];

fn entry_for_code(code: &str) -> Option<&'static SpeedEntry> {
    SPEED_TABLE.iter().find(|entry| entry.code == code)
}

pub fn label_to_code(label: &str) -> Option<&'static str> {
    SPEED_TABLE
        .iter()
        .find(|entry| entry.label == label)
        .map(|entry| entry.code)
}

/// Unknown codes display as normal speed.
pub fn code_to_label(code: &str) -> &'static str {
    entry_for_code(code).map_or(NORMAL_LABEL, |entry| entry.label)
}

/// Stored multiplier is the reciprocal of the displayed one; unknown
/// codes play at 1.0.
pub fn multiplier_for(code: &str) -> f64 {
    1.0 / entry_for_code(code).map_or(1.0, |entry| entry.display_multiplier)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedCode {
    Normal,
    Minus3,
    Minus2,
    Minus1,
    Plus1,
    Plus2,
    Plus3,
    Plus4,
    Unknown(String),
}

impl SpeedCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "=" => Self::Normal,
            "---" => Self::Minus3,
            "--" => Self::Minus2,
            "-" => Self::Minus1,
            "+" => Self::Plus1,
            "++" => Self::Plus2,
            "+++" => Self::Plus3,
            "++++" => Self::Plus4,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        label_to_code(label).map(Self::from_code)
    }

    pub fn as_code(&self) -> &str {
        match self {
            Self::Normal => "=",
            Self::Minus3 => "---",
            Self::Minus2 => "--",
            Self::Minus1 => "-",
            Self::Plus1 => "+",
            Self::Plus2 => "++",
            Self::Plus3 => "+++",
            Self::Plus4 => "++++",
            Self::Unknown(code) => code,
        }
    }

    pub fn label(&self) -> &'static str {
        code_to_label(self.as_code())
    }

    pub fn multiplier(&self) -> f64 {
        multiplier_for(self.as_code())
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for SpeedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}
