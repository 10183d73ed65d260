//! Pure graph composition helpers.
//!
//! Everything here builds value objects only; resolving workflow ids against
//! the backend happens in the client crate.

use geopipe_core::models::SpatialReference;

use crate::operator::{
    ColumnRangeFilterParams, ReprojectionParams, SingleSource, TypedOperator, VectorSource,
};

/// The common spatial reference a set of inputs is harmonized to.
///
/// Policy: the first input's reference is canonical; `None` for an empty
/// input set.
pub fn projection_target(references: &[SpatialReference]) -> Option<&SpatialReference> {
    references.first()
}

/// Wraps `operator` in a `Reprojection` towards `target` unless it already
/// is in `target`.
pub fn reprojected(
    operator: TypedOperator,
    source_reference: &SpatialReference,
    target: &SpatialReference,
) -> TypedOperator {
    if source_reference == target {
        return operator;
    }

    TypedOperator::Reprojection {
        params: ReprojectionParams {
            target_spatial_reference: target.clone(),
        },
        sources: SingleSource::new(operator),
    }
}

/// Harmonizes the inputs to the first input's spatial reference, preserving
/// order so that sibling parameter arrays stay correlated by index.
pub fn harmonized(inputs: Vec<(TypedOperator, SpatialReference)>) -> Vec<TypedOperator> {
    let references: Vec<SpatialReference> =
        inputs.iter().map(|(_, reference)| reference.clone()).collect();
    let Some(target) = projection_target(&references).cloned() else {
        return Vec::new();
    };

    inputs
        .into_iter()
        .map(|(operator, reference)| reprojected(operator, &reference, &target))
        .collect()
}

/// Chains column-range filters over `input`, applied in slice order: the
/// first filter wraps the input directly and the last one becomes the root
/// that gets registered.
///
/// A fold rather than recursion, so arbitrarily long chains use constant
/// stack.
pub fn chained_column_range_filters(
    input: TypedOperator,
    filters: &[ColumnRangeFilterParams],
) -> TypedOperator {
    filters.iter().fold(input, |source, params| {
        TypedOperator::ColumnRangeFilter {
            params: params.clone(),
            sources: VectorSource::new(source),
        }
    })
}
