use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The semantic interpretation of a raster band or vector column.
///
/// Flows from dataset ingestion through every operator's declared output and
/// governs downstream rendering and statistics choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Measurement {
    /// No unit semantics attached.
    Unitless,
    /// A continuous quantity, e.g. "temperature" in "°C".
    Continuous {
        measurement: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    /// A discrete classification mapping class codes to labels.
    Classification {
        measurement: String,
        classes: BTreeMap<u8, String>,
    },
}

impl Measurement {
    pub fn continuous(measurement: impl Into<String>, unit: Option<String>) -> Self {
        Self::Continuous {
            measurement: measurement.into(),
            unit,
        }
    }

    pub fn classification(
        measurement: impl Into<String>,
        classes: BTreeMap<u8, String>,
    ) -> Self {
        Self::Classification {
            measurement: measurement.into(),
            classes,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Unitless => Ok(()),
            Measurement::Continuous {
                measurement,
                unit: Some(unit),
            } => write!(f, "{measurement} ({unit})"),
            Measurement::Continuous {
                measurement,
                unit: None,
            } => f.write_str(measurement),
            Measurement::Classification { measurement, .. } => f.write_str(measurement),
        }
    }
}
