//! Emergency service category value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Emergency service category a search is run for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    /// Police stations
    #[default]
    Police,
    /// Fire stations
    Fire,
    /// Ambulance stations and hospitals
    Ambulance,
}

impl Department {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Police => "Police",
            Self::Fire => "Fire",
            Self::Ambulance => "Ambulance",
        }
    }

    /// Get an emoji representation
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Police => "🚓",
            Self::Fire => "🚒",
            Self::Ambulance => "🚑",
        }
    }

    /// All departments in display order
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Police, Self::Fire, Self::Ambulance]
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Department {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "police" | "polizei" => Ok(Self::Police),
            "fire" | "feuerwehr" => Ok(Self::Fire),
            "ambulance" | "rettung" => Ok(Self::Ambulance),
            _ => Err(DomainError::UnknownDepartment(s.to_string())),
        }
    }
}
