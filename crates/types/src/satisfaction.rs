//! Satisfaction levels offered by the kiosk

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::KioskError;

/// One of the three satisfaction levels a visitor can pick
///
/// The serialized names are the wire names used by the kiosk surface and by
/// every export format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Satisfaction {
    /// Very satisfied
    #[serde(rename = "muito_satisfeito")]
    VerySatisfied,
    /// Satisfied
    #[serde(rename = "satisfeito")]
    Satisfied,
    /// Unsatisfied
    #[serde(rename = "insatisfeito")]
    Unsatisfied,
}

impl Satisfaction {
    /// All levels in display order
    pub const ALL: [Satisfaction; 3] = [
        Satisfaction::VerySatisfied,
        Satisfaction::Satisfied,
        Satisfaction::Unsatisfied,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Satisfaction::VerySatisfied => "muito_satisfeito",
            Satisfaction::Satisfied => "satisfeito",
            Satisfaction::Unsatisfied => "insatisfeito",
        }
    }

    /// Human readable title
    pub fn title(&self) -> &'static str {
        match self {
            Satisfaction::VerySatisfied => "Muito satisfeito",
            Satisfaction::Satisfied => "Satisfeito",
            Satisfaction::Unsatisfied => "Insatisfeito",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Satisfaction::VerySatisfied => "😍",
            Satisfaction::Satisfied => "🙂",
            Satisfaction::Unsatisfied => "🙁",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Satisfaction::VerySatisfied => "Excelente",
            Satisfaction::Satisfied => "Bom",
            Satisfaction::Unsatisfied => "Pode melhorar",
        }
    }

    /// Position in display order (0..3)
    pub fn index(&self) -> usize {
        match self {
            Satisfaction::VerySatisfied => 0,
            Satisfaction::Satisfied => 1,
            Satisfaction::Unsatisfied => 2,
        }
    }
}

impl fmt::Display for Satisfaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Satisfaction {
    type Err = KioskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Satisfaction::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| KioskError::UnknownSatisfaction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        assert_eq!(
            "muito_satisfeito".parse::<Satisfaction>().unwrap(),
            Satisfaction::VerySatisfied
        );
        assert_eq!("satisfeito".parse::<Satisfaction>().unwrap(), Satisfaction::Satisfied);
        assert_eq!(
            "insatisfeito".parse::<Satisfaction>().unwrap(),
            Satisfaction::Unsatisfied
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "very_satisfied".parse::<Satisfaction>().unwrap_err();
        assert!(matches!(err, KioskError::UnknownSatisfaction(ref s) if s == "very_satisfied"));
        assert!("Satisfeito".parse::<Satisfaction>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Satisfaction::VerySatisfied).unwrap();
        assert_eq!(json, "\"muito_satisfeito\"");

        let level: Satisfaction = serde_json::from_str("\"insatisfeito\"").unwrap();
        assert_eq!(level, Satisfaction::Unsatisfied);
    }

    #[test]
    fn test_display_order_and_locale() {
        let titles: Vec<_> = Satisfaction::ALL.iter().map(|s| s.title()).collect();
        assert_eq!(titles, vec!["Muito satisfeito", "Satisfeito", "Insatisfeito"]);

        for (i, level) in Satisfaction::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
        assert_eq!(Satisfaction::Unsatisfied.hint(), "Pode melhorar");
    }
}
