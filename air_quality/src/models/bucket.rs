//! Canonical in-memory representation of one hour of air-quality history.
//!
//! This struct is the standard output of every [`LookupProvider`](crate::providers::LookupProvider)
//! history call, regardless of which upstream produced the reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unit code the upstream uses for parts-per-billion concentrations.
pub const PARTS_PER_BILLION: &str = "PARTS_PER_BILLION";
/// Unit code the upstream uses for µg/m³ concentrations.
pub const MICROGRAMS_PER_CUBIC_METER: &str = "MICROGRAMS_PER_CUBIC_METER";

/// A pollutant concentration as reported upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concentration {
    /// Measured value, in `units`.
    pub value: f64,
    /// Upstream unit code, e.g. `PARTS_PER_BILLION`.
    pub units: String,
}

impl Concentration {
    pub fn new(value: f64, units: impl Into<String>) -> Self {
        Self {
            value,
            units: units.into(),
        }
    }

    /// Display symbol for the unit code, if it is one we know.
    pub fn symbol(&self) -> Option<&'static str> {
        unit_symbol(&self.units)
    }
}

/// Maps an upstream unit code to its display symbol.
pub fn unit_symbol(units: &str) -> Option<&'static str> {
    match units {
        PARTS_PER_BILLION => Some("ppb"),
        MICROGRAMS_PER_CUBIC_METER => Some("μg/m³"),
        _ => None,
    }
}

/// A concentration together with its display symbol, as sent to chart clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConcentration {
    pub value: f64,
    pub units: String,
    /// Empty when the unit code has no known symbol.
    pub symbol: String,
}

impl From<&Concentration> for DisplayConcentration {
    fn from(c: &Concentration) -> Self {
        Self {
            value: c.value,
            units: c.units.clone(),
            symbol: c.symbol().unwrap_or_default().to_string(),
        }
    }
}

/// A single hourly air-quality reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    /// Start of the hour this reading covers (UTC).
    pub timestamp: DateTime<Utc>,

    /// Index code, e.g. `uaqi` or `usa_epa`.
    pub aqi_code: String,

    /// Human-readable index name.
    pub aqi_display_name: String,

    /// Numeric index value.
    pub aqi_value: i64,

    /// Index value formatted by the upstream for display.
    pub aqi_display_value: String,

    /// Code of the pollutant the upstream considers dominant for this hour.
    pub dominant_pollutant_code: String,

    pub dominant_pollutant_display_name: String,

    /// Concentration of the dominant pollutant.
    pub dominant_pollutant_concentration: Concentration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_units_have_symbols() {
        assert_eq!(unit_symbol("PARTS_PER_BILLION"), Some("ppb"));
        assert_eq!(unit_symbol("MICROGRAMS_PER_CUBIC_METER"), Some("μg/m³"));
    }

    #[test]
    fn unknown_units_have_no_symbol() {
        assert_eq!(unit_symbol("PARTS_PER_MILLION"), None);
        assert_eq!(unit_symbol(""), None);

        let shown = DisplayConcentration::from(&Concentration::new(1.5, "SOMETHING_ELSE"));
        assert_eq!(shown.symbol, "");
        assert_eq!(shown.units, "SOMETHING_ELSE");
    }
}
