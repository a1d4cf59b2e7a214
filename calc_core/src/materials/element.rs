//! Structural element kinds
//!
//! Each kind picks a column of the mix-ratio table and names its three
//! dimensions differently. The dimension names matter for the saved-record
//! format, so they are exposed here.

use serde::{Deserialize, Serialize};

/// The structural member being poured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    #[default]
    Slab,
    Beam,
    Column,
    Footing,
}

impl ElementKind {
    /// All element kinds in form tab order
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Slab,
        ElementKind::Beam,
        ElementKind::Column,
        ElementKind::Footing,
    ];

    /// Lowercase code used for form ids and record keys
    pub fn code(&self) -> &'static str {
        match self {
            ElementKind::Slab => "slab",
            ElementKind::Beam => "beam",
            ElementKind::Column => "column",
            ElementKind::Footing => "footing",
        }
    }

    /// Parse a form code. Returns `None` for anything unrecognized.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "slab" => Some(ElementKind::Slab),
            "beam" => Some(ElementKind::Beam),
            "column" => Some(ElementKind::Column),
            "footing" => Some(ElementKind::Footing),
            _ => None,
        }
    }

    /// Get display name (tab label)
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Slab => "Slab",
            ElementKind::Beam => "Beam",
            ElementKind::Column => "Column",
            ElementKind::Footing => "Footing",
        }
    }

    /// Names of the three dimensions, in input order
    pub fn dimension_names(&self) -> [&'static str; 3] {
        match self {
            ElementKind::Slab | ElementKind::Footing => ["length", "width", "thickness"],
            ElementKind::Beam => ["length", "width", "height"],
            ElementKind::Column => ["height", "width", "depth"],
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
