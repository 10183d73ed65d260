use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeopipeError;

/// A coordinate reference system identifier of the form `authority:code`,
/// e.g. `EPSG:4326`.
///
/// The string is treated as opaque: two references are the same system iff
/// their strings are equal. Resolution of the code into projection
/// parameters happens on the processing backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpatialReference(String);

impl SpatialReference {
    /// WGS 84 (EPSG:4326)
    pub fn wgs84() -> Self {
        Self("EPSG:4326".to_string())
    }

    /// Web Mercator (EPSG:3857)
    pub fn web_mercator() -> Self {
        Self("EPSG:3857".to_string())
    }

    pub fn srs_string(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SpatialReference {
    type Err = GeopipeError;

    fn from_str(srs: &str) -> Result<Self, Self::Err> {
        match srs.split_once(':') {
            Some((authority, code)) if !authority.is_empty() && !code.is_empty() => {
                Ok(Self(srs.to_string()))
            }
            _ => Err(GeopipeError::InvalidSpatialReference {
                srs: srs.to_string(),
            }),
        }
    }
}
