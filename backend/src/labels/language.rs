//! Supported response languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// Language of the indicator labels in a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::De];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }
}

impl FromStr for Language {
    type Err = LookupError;

    /// Accepts `en`/`de` in any case. Anything else is rejected rather than
    /// falling back to English.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            _ => Err(LookupError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_codes() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!(" DE ".parse::<Language>().unwrap(), Language::De);
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_unsupported_code_is_rejected() {
        let err = "fr".parse::<Language>().unwrap_err();
        assert!(matches!(err, LookupError::UnsupportedLanguage(ref code) if code == "fr"));
        assert!("".parse::<Language>().is_err());
    }
}
