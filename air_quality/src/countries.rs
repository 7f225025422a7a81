//! Allow-list of countries the air-quality upstream covers.

use indexmap::IndexSet;

use crate::config::Settings;

/// ISO 3166-1 alpha-2 codes (lowercase) with air-quality coverage.
pub const BUILTIN_SUPPORTED_COUNTRIES: [&str; 96] = [
    "al", "as", "ad", "ar", "am", "au", "at", "az", "bs", "bh", "bd", "by", "be", "ba", "br",
    "bn", "bg", "ca", "cl", "cn", "co", "cr", "hr", "cy", "cz", "dk", "ec", "eg", "ee", "et",
    "fi", "fr", "ge", "de", "gi", "gr", "gu", "gg", "hk", "hu", "in", "id", "ie", "il", "it",
    "jp", "je", "jo", "ke", "kr", "kw", "lv", "li", "lt", "lu", "my", "mt", "mu", "mx", "md",
    "mn", "me", "ma", "np", "nl", "nz", "mk", "no", "pk", "pe", "ph", "pl", "pt", "pr", "qa",
    "re", "ro", "ru", "sa", "rs", "sg", "sk", "si", "za", "es", "lk", "se", "ch", "tw", "th",
    "tr", "ug", "ua", "ae", "gb", "us",
];

/// Immutable set of supported country codes.
///
/// Built once at startup and shared read-only between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedCountries {
    codes: IndexSet<String>,
}

impl Default for SupportedCountries {
    fn default() -> Self {
        Self::new(BUILTIN_SUPPORTED_COUNTRIES)
    }
}

impl SupportedCountries {
    /// Codes are lowercased and trimmed on the way in.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codes: codes
                .into_iter()
                .map(|c| c.as_ref().trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    /// The configured override if there is one, else the built-in list.
    pub fn from_settings(settings: &Settings) -> Self {
        match &settings.supported_countries {
            Some(codes) => Self::new(codes),
            None => Self::default(),
        }
    }

    /// Case-insensitive membership test. Empty or unknown codes are unsupported.
    pub fn is_supported(&self, country_code: &str) -> bool {
        let code = country_code.trim().to_lowercase();
        !code.is_empty() && self.codes.contains(&code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
