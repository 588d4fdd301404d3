use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The fixed set of document categories.
///
/// Categories are disjoint partitions of the library: every record belongs to
/// exactly one, and the category never changes after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "touchComp")]
    TouchComp,
    #[serde(rename = "proceduresInternal", alias = "procedimentosInternos")]
    ProceduresInternal,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 2] = [Category::TouchComp, Category::ProceduresInternal];

    /// Wire name used in JSON bodies and form fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TouchComp => "touchComp",
            Self::ProceduresInternal => "proceduresInternal",
        }
    }

    /// Human-readable section title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::TouchComp => "TouchComp",
            Self::ProceduresInternal => "Internal Procedures",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "touchComp" => Ok(Self::TouchComp),
            // Older front ends posted the Portuguese key.
            "proceduresInternal" | "procedimentosInternos" => Ok(Self::ProceduresInternal),
            "" => Err(TypeError::EmptyField { field: "category" }),
            other => Err(TypeError::UnknownCategory(other.to_string())),
        }
    }
}
