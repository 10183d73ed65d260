//! The typed operator graph.
//!
//! [`TypedOperator`] is the closed set of processing nodes the backend
//! accepts, dispatched by the `type` discriminant on the wire. Source
//! operators are leaves referencing a [`DataId`]; derived operators carry a
//! `sources` struct whose fields are the operator's named input slots, so
//! slot names and arities are fixed by the type system and malformed shapes
//! are unrepresentable.
//!
//! Graphs are trees by construction: child nodes are owned, so sharing a
//! subgraph or referencing an ancestor cannot be expressed.

use serde::{Deserialize, Serialize};

use geopipe_core::error::{GeopipeError, Result};
use geopipe_core::models::{
    Measurement, RasterDataType, SpatialReference, Time, TimeStep, TimeStepGranularity,
};

use crate::data_id::DataId;
use crate::neighborhood::Neighborhood;
use crate::workflow::WorkflowType;

/// A node of the processing graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TypedOperator {
    // source operators (leaves)
    OgrSource {
        params: SourceParams,
    },
    GdalSource {
        params: SourceParams,
    },

    // raster operators
    Expression {
        params: ExpressionParams,
        sources: ExpressionSources,
    },
    NeighborhoodAggregate {
        params: NeighborhoodAggregateParams,
        sources: RasterSource,
    },
    Reprojection {
        params: ReprojectionParams,
        sources: SingleSource,
    },
    RasterStacker {
        params: EmptyParams,
        sources: RasterSources,
    },
    RasterTypeConversion {
        params: RasterTypeConversionParams,
        sources: RasterSource,
    },
    TemporalRasterAggregation {
        params: TemporalRasterAggregationParams,
        sources: RasterSource,
    },
    TimeShift {
        params: TimeShiftParams,
        sources: SingleSource,
    },
    Interpolation {
        params: InterpolationParams,
        sources: RasterSource,
    },

    // vector operators
    RasterVectorJoin {
        params: RasterVectorJoinParams,
        sources: RasterVectorJoinSources,
    },
    PointInPolygonFilter {
        params: EmptyParams,
        sources: PointInPolygonSources,
    },
    ColumnRangeFilter {
        params: ColumnRangeFilterParams,
        sources: VectorSource,
    },

    // plot operators
    Statistics {
        params: StatisticsParams,
        sources: MultiSource,
    },
    Histogram {
        params: HistogramParams,
        sources: SingleSource,
    },
    PieChart {
        params: PieChartParams,
        sources: VectorSource,
    },
    BoxPlot {
        params: BoxPlotParams,
        sources: MultiSource,
    },
    ScatterPlot {
        params: ScatterPlotParams,
        sources: VectorSource,
    },
}

impl TypedOperator {
    pub fn ogr_source(data: DataId) -> Self {
        Self::OgrSource {
            params: SourceParams { data },
        }
    }

    pub fn gdal_source(data: DataId) -> Self {
        Self::GdalSource {
            params: SourceParams { data },
        }
    }

    /// A `NeighborhoodAggregate`, rejecting unusable neighborhoods up front.
    pub fn neighborhood_aggregate(
        params: NeighborhoodAggregateParams,
        raster: TypedOperator,
    ) -> Result<Self> {
        params.neighborhood.validate()?;
        Ok(Self::NeighborhoodAggregate {
            params,
            sources: RasterSource {
                raster: Box::new(raster),
            },
        })
    }

    /// A `RasterVectorJoin`, rejecting a `names`/`rasters` length mismatch
    /// up front. The order of `rasters` must match the order of
    /// `params.names`.
    pub fn raster_vector_join(
        params: RasterVectorJoinParams,
        vector: TypedOperator,
        rasters: Vec<TypedOperator>,
    ) -> Result<Self> {
        if params.names.len() != rasters.len() {
            return Err(GeopipeError::JoinNamesLengthMismatch {
                names: params.names.len(),
                rasters: rasters.len(),
            });
        }
        Ok(Self::RasterVectorJoin {
            params,
            sources: RasterVectorJoinSources {
                vector: Box::new(vector),
                rasters,
            },
        })
    }

    /// The workflow kind this operator produces. Pass-through operators
    /// (`Reprojection`, `TimeShift`) produce whatever their source produces.
    pub fn result_kind(&self) -> WorkflowType {
        match self {
            TypedOperator::GdalSource { .. }
            | TypedOperator::Expression { .. }
            | TypedOperator::NeighborhoodAggregate { .. }
            | TypedOperator::RasterStacker { .. }
            | TypedOperator::RasterTypeConversion { .. }
            | TypedOperator::TemporalRasterAggregation { .. }
            | TypedOperator::Interpolation { .. } => WorkflowType::Raster,

            TypedOperator::OgrSource { .. }
            | TypedOperator::RasterVectorJoin { .. }
            | TypedOperator::PointInPolygonFilter { .. }
            | TypedOperator::ColumnRangeFilter { .. } => WorkflowType::Vector,

            TypedOperator::Reprojection { sources, .. }
            | TypedOperator::TimeShift { sources, .. } => sources.source.result_kind(),

            TypedOperator::Statistics { .. }
            | TypedOperator::Histogram { .. }
            | TypedOperator::PieChart { .. }
            | TypedOperator::BoxPlot { .. }
            | TypedOperator::ScatterPlot { .. } => WorkflowType::Plot,
        }
    }

    /// The wire discriminant of this node.
    pub fn operator_type(&self) -> &'static str {
        match self {
            TypedOperator::OgrSource { .. } => "OgrSource",
            TypedOperator::GdalSource { .. } => "GdalSource",
            TypedOperator::Expression { .. } => "Expression",
            TypedOperator::NeighborhoodAggregate { .. } => "NeighborhoodAggregate",
            TypedOperator::Reprojection { .. } => "Reprojection",
            TypedOperator::RasterStacker { .. } => "RasterStacker",
            TypedOperator::RasterTypeConversion { .. } => "RasterTypeConversion",
            TypedOperator::TemporalRasterAggregation { .. } => "TemporalRasterAggregation",
            TypedOperator::TimeShift { .. } => "TimeShift",
            TypedOperator::Interpolation { .. } => "Interpolation",
            TypedOperator::RasterVectorJoin { .. } => "RasterVectorJoin",
            TypedOperator::PointInPolygonFilter { .. } => "PointInPolygonFilter",
            TypedOperator::ColumnRangeFilter { .. } => "ColumnRangeFilter",
            TypedOperator::Statistics { .. } => "Statistics",
            TypedOperator::Histogram { .. } => "Histogram",
            TypedOperator::PieChart { .. } => "PieChart",
            TypedOperator::BoxPlot { .. } => "BoxPlot",
            TypedOperator::ScatterPlot { .. } => "ScatterPlot",
        }
    }

    pub fn is_source(&self) -> bool {
        matches!(
            self,
            TypedOperator::OgrSource { .. } | TypedOperator::GdalSource { .. }
        )
    }

    /// The child operators in slot order.
    pub fn source_operators(&self) -> Vec<&TypedOperator> {
        match self {
            TypedOperator::OgrSource { .. } | TypedOperator::GdalSource { .. } => Vec::new(),

            TypedOperator::Expression { sources, .. } => {
                let mut children: Vec<&TypedOperator> = vec![&sources.a];
                for slot in [
                    &sources.b, &sources.c, &sources.d, &sources.e, &sources.f, &sources.g,
                    &sources.h,
                ] {
                    if let Some(child) = slot {
                        children.push(child);
                    }
                }
                children
            }

            TypedOperator::NeighborhoodAggregate { sources, .. }
            | TypedOperator::RasterTypeConversion { sources, .. }
            | TypedOperator::TemporalRasterAggregation { sources, .. }
            | TypedOperator::Interpolation { sources, .. } => vec![sources.raster.as_ref()],

            TypedOperator::Reprojection { sources, .. }
            | TypedOperator::TimeShift { sources, .. }
            | TypedOperator::Histogram { sources, .. } => vec![sources.source.as_ref()],

            TypedOperator::RasterStacker { sources, .. } => sources.rasters.iter().collect(),

            TypedOperator::RasterVectorJoin { sources, .. } => {
                let mut children = vec![sources.vector.as_ref()];
                children.extend(sources.rasters.iter());
                children
            }

            TypedOperator::PointInPolygonFilter { sources, .. } => {
                vec![sources.points.as_ref(), sources.polygons.as_ref()]
            }

            TypedOperator::ColumnRangeFilter { sources, .. }
            | TypedOperator::PieChart { sources, .. }
            | TypedOperator::ScatterPlot { sources, .. } => vec![sources.vector.as_ref()],

            TypedOperator::Statistics { sources, .. }
            | TypedOperator::BoxPlot { sources, .. } => sources.source.iter().collect(),
        }
    }

    /// Recursively checks the node-level invariants the backend would
    /// reject: neighborhood dimensions and correlated parameter/source
    /// lengths. The slot shapes themselves need no checking here since the
    /// `sources` structs already fix them.
    pub fn validate(&self) -> Result<()> {
        match self {
            TypedOperator::NeighborhoodAggregate { params, .. } => {
                params.neighborhood.validate()?;
            }
            TypedOperator::RasterVectorJoin { params, sources } => {
                if params.names.len() != sources.rasters.len() {
                    return Err(GeopipeError::JoinNamesLengthMismatch {
                        names: params.names.len(),
                        rasters: sources.rasters.len(),
                    });
                }
            }
            _ => {}
        }

        for child in self.source_operators() {
            child.validate()?;
        }

        Ok(())
    }

    /// The slot contract of this operator type.
    pub fn slots(&self) -> &'static [SlotSpec] {
        slot_table(self.operator_type()).unwrap_or(NO_SLOTS)
    }
}

/// Arity of a named source slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotArity {
    Single,
    OptionalSingle,
    Variadic,
}

/// A named source slot and its arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSpec {
    pub name: &'static str,
    pub arity: SlotArity,
}

const fn single(name: &'static str) -> SlotSpec {
    SlotSpec {
        name,
        arity: SlotArity::Single,
    }
}

const fn optional(name: &'static str) -> SlotSpec {
    SlotSpec {
        name,
        arity: SlotArity::OptionalSingle,
    }
}

const fn variadic(name: &'static str) -> SlotSpec {
    SlotSpec {
        name,
        arity: SlotArity::Variadic,
    }
}

const NO_SLOTS: &[SlotSpec] = &[];
const EXPRESSION_SLOTS: &[SlotSpec] = &[
    single("a"),
    optional("b"),
    optional("c"),
    optional("d"),
    optional("e"),
    optional("f"),
    optional("g"),
    optional("h"),
];
const RASTER_SLOT: &[SlotSpec] = &[single("raster")];
const SOURCE_SLOT: &[SlotSpec] = &[single("source")];
const RASTERS_SLOT: &[SlotSpec] = &[variadic("rasters")];
const VECTOR_RASTERS_SLOTS: &[SlotSpec] = &[single("vector"), variadic("rasters")];
const POINTS_POLYGONS_SLOTS: &[SlotSpec] = &[single("points"), single("polygons")];
const VECTOR_SLOT: &[SlotSpec] = &[single("vector")];
const MULTI_SOURCE_SLOT: &[SlotSpec] = &[variadic("source")];

/// The static slot table: operator type → named slots and arities.
///
/// This is the same contract the `sources` structs encode in the type
/// system, in enumerable form. `None` for unknown operator types.
pub fn slot_table(operator_type: &str) -> Option<&'static [SlotSpec]> {
    Some(match operator_type {
        "OgrSource" | "GdalSource" => NO_SLOTS,
        "Expression" => EXPRESSION_SLOTS,
        "NeighborhoodAggregate" | "RasterTypeConversion" | "TemporalRasterAggregation"
        | "Interpolation" => RASTER_SLOT,
        "Reprojection" | "TimeShift" | "Histogram" => SOURCE_SLOT,
        "RasterStacker" => RASTERS_SLOT,
        "RasterVectorJoin" => VECTOR_RASTERS_SLOTS,
        "PointInPolygonFilter" => POINTS_POLYGONS_SLOTS,
        "ColumnRangeFilter" | "PieChart" | "ScatterPlot" => VECTOR_SLOT,
        "Statistics" | "BoxPlot" => MULTI_SOURCE_SLOT,
        _ => return None,
    })
}

// --- params ---

/// Parameters of a source operator: the dataset it reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceParams {
    pub data: DataId,
}

/// Marker for operators without parameters; serializes as `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmptyParams {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionParams {
    /// Arithmetic expression over the inputs `A`..`H`, e.g. `(A - B) / (A + B)`.
    pub expression: String,
    pub output_type: RasterDataType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_measurement: Option<Measurement>,
    pub map_no_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborhoodAggregateParams {
    pub neighborhood: Neighborhood,
    pub aggregate_function: NeighborhoodAggregateFunction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NeighborhoodAggregateFunction {
    Sum,
    StandardDeviation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReprojectionParams {
    pub target_spatial_reference: SpatialReference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterTypeConversionParams {
    pub output_data_type: RasterDataType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalRasterAggregationParams {
    pub aggregation: RasterAggregation,
    pub window: TimeStep,
    /// Anchor instant for the aggregation windows, RFC 3339.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_type: Option<RasterDataType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterAggregation {
    #[serde(rename = "type")]
    pub aggregation_type: RasterAggregationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_no_data: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterAggregationType {
    Min,
    Max,
    First,
    Last,
    Mean,
    Sum,
    Count,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimeShiftParams {
    #[serde(rename_all = "camelCase")]
    Absolute { time_interval: Time },
    Relative {
        granularity: TimeStepGranularity,
        value: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterpolationParams {
    pub interpolation: InterpolationMethod,
    pub input_resolution: InputResolution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationMethod {
    NearestNeighbor,
    Bilinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputResolution {
    Source,
    Value { x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterVectorJoinParams {
    /// Output column names, one per raster source, correlated by index.
    pub names: Vec<String>,
    pub temporal_aggregation: TemporalAggregation,
    pub feature_aggregation: FeatureAggregation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalAggregation {
    None,
    First,
    Mean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureAggregation {
    First,
    Mean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRangeFilterParams {
    pub column: String,
    pub ranges: ColumnRanges,
    pub keep_nulls: bool,
}

/// Inclusive `[min, max]` ranges; numeric for numeric columns, textual for
/// text columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRanges {
    Number(Vec<[f64; 2]>),
    Text(Vec<[String; 2]>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsParams {
    pub column_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    pub bounds: HistogramBounds,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buckets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistogramBounds {
    Range { min: f64, max: f64 },
    Auto(HistogramAutoBounds),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistogramAutoBounds {
    Data,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PieChartParams {
    #[serde(rename_all = "camelCase")]
    Count {
        column_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        donut: Option<bool>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxPlotParams {
    pub column_names: Vec<String>,
    pub include_no_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPlotParams {
    pub column_x: String,
    pub column_y: String,
}

// --- sources ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSource {
    pub source: Box<TypedOperator>,
}

impl SingleSource {
    pub fn new(source: TypedOperator) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSource {
    pub vector: Box<TypedOperator>,
}

impl VectorSource {
    pub fn new(vector: TypedOperator) -> Self {
        Self {
            vector: Box::new(vector),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterSource {
    pub raster: Box<TypedOperator>,
}

impl RasterSource {
    pub fn new(raster: TypedOperator) -> Self {
        Self {
            raster: Box::new(raster),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterSources {
    pub rasters: Vec<TypedOperator>,
}

/// A variadic `source` slot, as used by the statistics and box-plot
/// operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSource {
    pub source: Vec<TypedOperator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointInPolygonSources {
    pub points: Box<TypedOperator>,
    pub polygons: Box<TypedOperator>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterVectorJoinSources {
    pub vector: Box<TypedOperator>,
    pub rasters: Vec<TypedOperator>,
}

/// The eight lettered inputs of an `Expression`; `a` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionSources {
    pub a: Box<TypedOperator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<Box<TypedOperator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<Box<TypedOperator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<Box<TypedOperator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<Box<TypedOperator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f: Option<Box<TypedOperator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g: Option<Box<TypedOperator>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<Box<TypedOperator>>,
}

impl ExpressionSources {
    pub fn unary(a: TypedOperator) -> Self {
        Self {
            a: Box::new(a),
            b: None,
            c: None,
            d: None,
            e: None,
            f: None,
            g: None,
            h: None,
        }
    }

    pub fn binary(a: TypedOperator, b: TypedOperator) -> Self {
        Self {
            b: Some(Box::new(b)),
            ..Self::unary(a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn vector_source() -> TypedOperator {
        TypedOperator::ogr_source(DataId::internal(Uuid::nil()))
    }

    fn raster_source() -> TypedOperator {
        TypedOperator::gdal_source(DataId::internal(Uuid::nil()))
    }

    #[test]
    fn test_result_kinds() {
        assert_eq!(vector_source().result_kind(), WorkflowType::Vector);
        assert_eq!(raster_source().result_kind(), WorkflowType::Raster);

        let stacker = TypedOperator::RasterStacker {
            params: EmptyParams {},
            sources: RasterSources {
                rasters: vec![raster_source()],
            },
        };
        assert_eq!(stacker.result_kind(), WorkflowType::Raster);

        let histogram = TypedOperator::Histogram {
            params: HistogramParams {
                column_name: None,
                bounds: HistogramBounds::Auto(HistogramAutoBounds::Data),
                buckets: None,
                interactive: None,
            },
            sources: SingleSource::new(raster_source()),
        };
        assert_eq!(histogram.result_kind(), WorkflowType::Plot);
    }

    #[test]
    fn test_reprojection_passes_kind_through() {
        let reprojected_vector = TypedOperator::Reprojection {
            params: ReprojectionParams {
                target_spatial_reference: SpatialReference::wgs84(),
            },
            sources: SingleSource::new(vector_source()),
        };
        assert_eq!(reprojected_vector.result_kind(), WorkflowType::Vector);

        let reprojected_raster = TypedOperator::Reprojection {
            params: ReprojectionParams {
                target_spatial_reference: SpatialReference::wgs84(),
            },
            sources: SingleSource::new(raster_source()),
        };
        assert_eq!(reprojected_raster.result_kind(), WorkflowType::Raster);
    }

    #[test]
    fn test_join_rejects_mismatched_names() {
        let params = RasterVectorJoinParams {
            names: vec!["ndvi".to_string(), "temperature".to_string()],
            temporal_aggregation: TemporalAggregation::None,
            feature_aggregation: FeatureAggregation::First,
        };
        let result =
            TypedOperator::raster_vector_join(params, vector_source(), vec![raster_source()]);
        assert!(matches!(
            result,
            Err(GeopipeError::JoinNamesLengthMismatch {
                names: 2,
                rasters: 1
            })
        ));
    }

    #[test]
    fn test_validate_recurses_into_sources() {
        let bad_inner = TypedOperator::NeighborhoodAggregate {
            params: NeighborhoodAggregateParams {
                neighborhood: Neighborhood::rectangle(2, 2),
                aggregate_function: NeighborhoodAggregateFunction::Sum,
            },
            sources: RasterSource::new(raster_source()),
        };
        let outer = TypedOperator::RasterTypeConversion {
            params: RasterTypeConversionParams {
                output_data_type: RasterDataType::F32,
            },
            sources: RasterSource::new(bad_inner),
        };
        assert!(outer.validate().is_err());
    }

    #[test]
    fn test_slot_table_matches_serialized_sources() {
        let join = TypedOperator::raster_vector_join(
            RasterVectorJoinParams {
                names: vec!["a".to_string()],
                temporal_aggregation: TemporalAggregation::Mean,
                feature_aggregation: FeatureAggregation::Mean,
            },
            vector_source(),
            vec![raster_source()],
        )
        .unwrap();

        let slots: Vec<&str> = join.slots().iter().map(|slot| slot.name).collect();
        assert_eq!(slots, vec!["vector", "rasters"]);

        let json = serde_json::to_value(&join).unwrap();
        let mut keys: Vec<&str> = json["sources"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        let mut expected = slots.clone();
        expected.sort_unstable();
        assert_eq!(keys, expected);

        assert!(slot_table("PointInPolygonFilter").is_some());
        assert!(slot_table("NoSuchOperator").is_none());
    }

    #[test]
    fn test_source_operators_order() {
        let filter = TypedOperator::PointInPolygonFilter {
            params: EmptyParams {},
            sources: PointInPolygonSources {
                points: Box::new(vector_source()),
                polygons: Box::new(vector_source()),
            },
        };
        assert_eq!(filter.source_operators().len(), 2);

        let expression = TypedOperator::Expression {
            params: ExpressionParams {
                expression: "A + B".to_string(),
                output_type: RasterDataType::F32,
                output_measurement: None,
                map_no_data: false,
            },
            sources: ExpressionSources::binary(raster_source(), raster_source()),
        };
        assert_eq!(expression.source_operators().len(), 2);
    }
}
