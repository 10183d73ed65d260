//! The closed sets of pixel, geometry, and column data types the backend
//! understands.

use serde::{Deserialize, Serialize};

/// Pixel data type of a raster band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RasterDataType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl RasterDataType {
    pub const ALL: [RasterDataType; 10] = [
        RasterDataType::U8,
        RasterDataType::U16,
        RasterDataType::U32,
        RasterDataType::U64,
        RasterDataType::I8,
        RasterDataType::I16,
        RasterDataType::I32,
        RasterDataType::I64,
        RasterDataType::F32,
        RasterDataType::F64,
    ];
}

/// Geometry type of a vector collection. `Data` marks collections without
/// geometry (plain attribute tables).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VectorDataType {
    Data,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

/// Data type of a vector attribute column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VectorColumnDataType {
    Categorical,
    Int,
    Float,
    Text,
    DateTime,
    Bool,
}

impl VectorColumnDataType {
    /// True exactly for the column types numeric operators (statistics,
    /// box plots, range filters with numeric bounds) accept.
    pub fn is_numeric(&self) -> bool {
        matches!(self, VectorColumnDataType::Int | VectorColumnDataType::Float)
    }
}
