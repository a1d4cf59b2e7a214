//! Mix Ratios by Element and Strength Class
//!
//! Cement : sand : gravel parts by mass for each element kind at each listed
//! PSI class. Parts are proportions, not absolute quantities. Any PSI value
//! outside the listed classes gets the general-purpose 1 : 2 : 4 mix.
//!
//! | PSI  | Slab          | Beam          | Column        | Footing       |
//! |------|---------------|---------------|---------------|---------------|
//! | 2500 | 1 : 3 : 6     | 1 : 3 : 6     | 1 : 3 : 6     | 1 : 3 : 6     |
//! | 3000 | 1 : 2.5 : 5   | 1 : 2.5 : 5   | 1 : 2.5 : 5   | 1 : 2.5 : 5   |
//! | 3500 | 1 : 2 : 4     | 1 : 2 : 4     | 1 : 2 : 4     | 1 : 2 : 4     |
//! | 4000 | 1 : 1.5 : 2.8 | 1 : 1.3 : 3   | 1 : 1.5 : 2.8 | 1 : 1.5 : 2.8 |
//! | 5000 | 1 : 1.2 : 2.3 | 1 : 1.2 : 2.3 | 1 : 1.2 : 2.3 | 1 : 1.2 : 2.3 |

use serde::{Deserialize, Serialize};

use super::ElementKind;

/// Target compressive-strength class.
///
/// Serializes as the bare PSI number so saved data stays readable.
/// Values outside the listed classes are kept as `Unlisted` rather than
/// rejected; they select the default mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum PsiClass {
    Psi2500,
    #[default]
    Psi3000,
    Psi3500,
    Psi4000,
    Psi5000,
    /// Any other value
    Unlisted(u32),
}

impl PsiClass {
    /// Listed classes for UI selection
    pub const ALL: [PsiClass; 5] = [
        PsiClass::Psi2500,
        PsiClass::Psi3000,
        PsiClass::Psi3500,
        PsiClass::Psi4000,
        PsiClass::Psi5000,
    ];

    /// The PSI number
    pub fn psi(&self) -> u32 {
        match self {
            PsiClass::Psi2500 => 2500,
            PsiClass::Psi3000 => 3000,
            PsiClass::Psi3500 => 3500,
            PsiClass::Psi4000 => 4000,
            PsiClass::Psi5000 => 5000,
            PsiClass::Unlisted(psi) => *psi,
        }
    }

    /// Whether this is one of the tabulated classes
    pub fn is_listed(&self) -> bool {
        !matches!(self, PsiClass::Unlisted(_))
    }

    /// Parse form text. Text that is not a whole number maps to `Unlisted(0)`.
    pub fn from_text(text: &str) -> Self {
        text.trim().parse::<u32>().map(PsiClass::from).unwrap_or(PsiClass::Unlisted(0))
    }
}

impl From<u32> for PsiClass {
    fn from(psi: u32) -> Self {
        match psi {
            2500 => PsiClass::Psi2500,
            3000 => PsiClass::Psi3000,
            3500 => PsiClass::Psi3500,
            4000 => PsiClass::Psi4000,
            5000 => PsiClass::Psi5000,
            other => PsiClass::Unlisted(other),
        }
    }
}

impl From<PsiClass> for u32 {
    fn from(class: PsiClass) -> Self {
        class.psi()
    }
}

impl std::fmt::Display for PsiClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} psi", self.psi())
    }
}

/// Cement : sand : gravel proportions by mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixRatio {
    pub cement: f64,
    pub sand: f64,
    pub gravel: f64,
}

impl MixRatio {
    /// General-purpose mix used when no tabulated ratio applies
    pub const DEFAULT: MixRatio = MixRatio::new(1.0, 2.0, 4.0);

    pub const fn new(cement: f64, sand: f64, gravel: f64) -> Self {
        MixRatio { cement, sand, gravel }
    }

    /// Sum of all parts
    pub fn parts_sum(&self) -> f64 {
        self.cement + self.sand + self.gravel
    }
}

impl Default for MixRatio {
    fn default() -> Self {
        MixRatio::DEFAULT
    }
}

impl std::fmt::Display for MixRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {} : {}", self.cement, self.sand, self.gravel)
    }
}

/// Tabulated ratio for an element and class, if one exists.
pub fn tabulated_ratio(element: ElementKind, psi: PsiClass) -> Option<MixRatio> {
    use ElementKind::*;
    use PsiClass::*;

    let ratio = match (element, psi) {
        (_, Unlisted(_)) => return None,
        (_, Psi2500) => MixRatio::new(1.0, 3.0, 6.0),
        (_, Psi3000) => MixRatio::new(1.0, 2.5, 5.0),
        (_, Psi3500) => MixRatio::new(1.0, 2.0, 4.0),
        (Beam, Psi4000) => MixRatio::new(1.0, 1.3, 3.0),
        (Slab | Column | Footing, Psi4000) => MixRatio::new(1.0, 1.5, 2.8),
        (_, Psi5000) => MixRatio::new(1.0, 1.2, 2.3),
    };
    Some(ratio)
}

/// Ratio for an element and class, falling back to [`MixRatio::DEFAULT`].
pub fn mix_ratio(element: ElementKind, psi: PsiClass) -> MixRatio {
    tabulated_ratio(element, psi).unwrap_or(MixRatio::DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_twenty_entries() {
        let count = ElementKind::ALL
            .iter()
            .flat_map(|&e| PsiClass::ALL.iter().map(move |&p| tabulated_ratio(e, p)))
            .filter(Option::is_some)
            .count();
        assert_eq!(count, 20);
    }

    #[test]
    fn test_beam_4000_differs() {
        assert_eq!(mix_ratio(ElementKind::Beam, PsiClass::Psi4000), MixRatio::new(1.0, 1.3, 3.0));
        assert_eq!(mix_ratio(ElementKind::Column, PsiClass::Psi4000), MixRatio::new(1.0, 1.5, 2.8));
    }

    #[test]
    fn test_unlisted_falls_back_to_default() {
        for element in ElementKind::ALL {
            assert_eq!(mix_ratio(element, PsiClass::from(9999)), MixRatio::DEFAULT);
        }
        assert_eq!(MixRatio::DEFAULT.parts_sum(), 7.0);
    }

    #[test]
    fn test_psi_parsing() {
        assert_eq!(PsiClass::from_text("4000"), PsiClass::Psi4000);
        assert_eq!(PsiClass::from_text(" 2500 "), PsiClass::Psi2500);
        assert_eq!(PsiClass::from_text("4200"), PsiClass::Unlisted(4200));
        assert_eq!(PsiClass::from_text("strong"), PsiClass::Unlisted(0));
        assert!(!PsiClass::from_text("").is_listed());
    }

    #[test]
    fn test_psi_serializes_as_number() {
        assert_eq!(serde_json::to_string(&PsiClass::Psi3500).unwrap(), "3500");
        let class: PsiClass = serde_json::from_str("5000").unwrap();
        assert_eq!(class, PsiClass::Psi5000);
        let other: PsiClass = serde_json::from_str("9999").unwrap();
        assert_eq!(other, PsiClass::Unlisted(9999));
    }

    #[test]
    fn test_default_class_is_3000() {
        assert_eq!(PsiClass::default(), PsiClass::Psi3000);
        assert_eq!(mix_ratio(ElementKind::Slab, PsiClass::default()), MixRatio::new(1.0, 2.5, 5.0));
    }
}
