use crate::error::{FarmError, Result};
use serde::{Deserialize, Serialize};

/// Languages the advisory catalog and speech synthesis support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Marathi,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Marathi];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Marathi => "Marathi",
        }
    }

    /// Two-letter code used for speech synthesis and model prompts.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Marathi => "mr",
        }
    }

    /// Regional speech locale, e.g. `mr-IN`.
    pub fn locale(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Marathi => "mr-IN",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Language::English => 0,
            Language::Hindi => 1,
            Language::Marathi => 2,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Language::English => Language::Hindi,
            Language::Hindi => Language::Marathi,
            Language::Marathi => Language::English,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Language::English => Language::Marathi,
            Language::Hindi => Language::English,
            Language::Marathi => Language::Hindi,
        }
    }

    /// Accepts the display name, the two-letter code or the locale.
    pub fn parse(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "english" | "en" | "en-in" => Ok(Language::English),
            "hindi" | "hi" | "hi-in" => Ok(Language::Hindi),
            "marathi" | "mr" | "mr-in" => Ok(Language::Marathi),
            _ => Err(FarmError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = FarmError;

    fn from_str(s: &str) -> Result<Self> {
        Language::parse(s)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_locales() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Hindi.code(), "hi");
        assert_eq!(Language::Marathi.code(), "mr");
        assert_eq!(Language::Marathi.locale(), "mr-IN");
    }

    #[test]
    fn parse_accepts_names_codes_and_locales() {
        assert_eq!(Language::parse("Hindi").unwrap(), Language::Hindi);
        assert_eq!(Language::parse("mr").unwrap(), Language::Marathi);
        assert_eq!(Language::parse(" EN-in ").unwrap(), Language::English);
        assert_eq!("marathi".parse::<Language>().unwrap(), Language::Marathi);
    }

    #[test]
    fn parse_rejects_unsupported() {
        assert!(matches!(
            Language::parse("tamil"),
            Err(FarmError::UnsupportedLanguage(_))
        ));
        assert!(Language::parse("").is_err());
    }

    #[test]
    fn indices_are_distinct_and_dense() {
        let mut seen = [false; 3];
        for lang in Language::ALL {
            seen[lang.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn next_cycles_through_all() {
        let mut lang = Language::English;
        for _ in 0..3 {
            lang = lang.next();
        }
        assert_eq!(lang, Language::English);
    }

    #[test]
    fn prev_steps_backwards() {
        assert_eq!(Language::English.prev(), Language::Marathi);
        for lang in Language::ALL {
            assert_eq!(lang.next().prev(), lang);
        }
    }
}
