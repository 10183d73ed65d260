//! Integration tests for composing, harmonizing, and materializing
//! workflows against an in-memory registry.

use std::collections::HashMap;
use uuid::Uuid;

use geopipe_client::harmonize::projected_operators;
use geopipe_client::layer::LayerMetadata;
use geopipe_client::memory::MemoryRegistry;
use geopipe_client::ports::WorkflowRegistry;
use geopipe_client::project::ActiveProject;
use geopipe_client::symbology::Symbology;
use geopipe_core::error::GeopipeError;
use geopipe_core::models::{
    Measurement, PlotResultDescriptor, RasterBandDescriptor, RasterDataType,
    RasterResultDescriptor, SpatialReference, Time, TypedResultDescriptor, VectorColumnDataType,
    VectorColumnInfo, VectorDataType, VectorResultDescriptor,
};
use geopipe_workflow::compose::chained_column_range_filters;
use geopipe_workflow::data_id::DataId;
use geopipe_workflow::neighborhood::Neighborhood;
use geopipe_workflow::operator::{
    ColumnRangeFilterParams, ColumnRanges, EmptyParams, NeighborhoodAggregateFunction,
    NeighborhoodAggregateParams, RasterSource, RasterSources, TypedOperator,
};
use geopipe_workflow::workflow::{Workflow, WorkflowId, WorkflowType};

fn raster_descriptor(spatial_reference: SpatialReference) -> TypedResultDescriptor {
    TypedResultDescriptor::Raster(RasterResultDescriptor {
        spatial_reference,
        data_type: RasterDataType::U8,
        bands: vec![RasterBandDescriptor::unitless("band")],
        time: None,
        bbox: None,
        resolution: None,
    })
}

fn vector_descriptor(spatial_reference: SpatialReference) -> TypedResultDescriptor {
    TypedResultDescriptor::Vector(VectorResultDescriptor {
        spatial_reference,
        data_type: VectorDataType::MultiPoint,
        columns: HashMap::from([(
            "population".to_string(),
            VectorColumnInfo {
                data_type: VectorColumnDataType::Int,
                measurement: Measurement::Unitless,
            },
        )]),
        time: None,
        bbox: None,
    })
}

fn raster_operator() -> TypedOperator {
    TypedOperator::gdal_source(DataId::internal(Uuid::new_v4()))
}

fn vector_operator() -> TypedOperator {
    TypedOperator::ogr_source(DataId::internal(Uuid::new_v4()))
}

async fn register_raster(
    registry: &MemoryRegistry,
    operator: TypedOperator,
    spatial_reference: SpatialReference,
) -> WorkflowId {
    registry
        .register_with_metadata(
            &Workflow::raster(operator).unwrap(),
            raster_descriptor(spatial_reference),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn harmonizing_uniform_references_inserts_no_reprojection() {
    let registry = MemoryRegistry::new();
    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(register_raster(&registry, raster_operator(), SpatialReference::wgs84()).await);
    }

    let operators = projected_operators(&registry, &ids).await.unwrap();

    assert_eq!(operators.len(), 3);
    for operator in &operators {
        assert!(matches!(operator, TypedOperator::GdalSource { .. }));
    }
}

#[tokio::test]
async fn harmonizing_mixed_references_wraps_only_the_divergent_input() {
    // input layers [A@EPSG:4326, B@EPSG:3857], stacked
    let registry = MemoryRegistry::new();
    let a_operator = raster_operator();
    let b_operator = raster_operator();

    let a_id = register_raster(&registry, a_operator.clone(), SpatialReference::wgs84()).await;
    let b_id =
        register_raster(&registry, b_operator.clone(), SpatialReference::web_mercator()).await;

    let operators = projected_operators(&registry, &[a_id, b_id]).await.unwrap();
    assert_eq!(operators.len(), 2);

    // A unchanged, in position 0
    assert_eq!(operators[0], a_operator);

    // B wrapped towards A's reference, in position 1
    let TypedOperator::Reprojection { params, sources } = &operators[1] else {
        panic!("expected a Reprojection around the second input");
    };
    assert_eq!(params.target_spatial_reference, SpatialReference::wgs84());
    assert_eq!(*sources.source, b_operator);

    // the harmonized operators feed the stacker in input order
    let stacker = TypedOperator::RasterStacker {
        params: EmptyParams {},
        sources: RasterSources {
            rasters: operators,
        },
    };
    let workflow = Workflow::raster(stacker).unwrap();
    let id = registry.register_workflow(&workflow).await.unwrap();
    assert_eq!(registry.get_workflow(id).await.unwrap(), workflow);
}

#[tokio::test]
async fn unresolvable_input_aborts_the_whole_composition() {
    let registry = MemoryRegistry::new();
    let known = register_raster(&registry, raster_operator(), SpatialReference::wgs84()).await;
    let unknown = WorkflowId(Uuid::new_v4());

    let before = registry.workflow_count();
    let result = projected_operators(&registry, &[known, unknown]).await;

    assert!(matches!(
        result,
        Err(GeopipeError::WorkflowNotFound { .. })
    ));
    // no partial graph was registered
    assert_eq!(registry.workflow_count(), before);
}

#[tokio::test]
async fn chained_filters_nest_around_the_original_operator() {
    let registry = MemoryRegistry::new();
    let input_operator = vector_operator();
    let input_id = registry
        .register_with_metadata(
            &Workflow::vector(input_operator.clone()).unwrap(),
            vector_descriptor(SpatialReference::wgs84()),
        )
        .await
        .unwrap();

    // recompose from the stored workflow, as an operator dialog would
    let stored = registry.get_workflow(input_id).await.unwrap();
    let filters: Vec<ColumnRangeFilterParams> = ["a", "b", "c"]
        .iter()
        .map(|column| ColumnRangeFilterParams {
            column: column.to_string(),
            ranges: ColumnRanges::Number(vec![[0.0, 10.0]]),
            keep_nulls: false,
        })
        .collect();

    let root = chained_column_range_filters(stored.operator, &filters);
    let workflow = Workflow::vector(root).unwrap();
    let registered_id = registry.register_workflow(&workflow).await.unwrap();

    // walk the registered graph: three filters deep, innermost source is
    // structurally equal to the original input operator
    let mut node = registry.get_workflow(registered_id).await.unwrap().operator;
    for expected_column in ["c", "b", "a"] {
        let TypedOperator::ColumnRangeFilter { params, sources } = node else {
            panic!("expected ColumnRangeFilter");
        };
        assert_eq!(params.column, expected_column);
        node = *sources.vector;
    }
    assert_eq!(node, input_operator);
}

#[tokio::test]
async fn even_neighborhood_is_rejected_before_any_network_call() {
    let registry = MemoryRegistry::new();

    let params = NeighborhoodAggregateParams {
        neighborhood: Neighborhood::weights_matrix(vec![
            vec![1.0, 2.0],
            vec![3.0, 4.0],
        ]),
        aggregate_function: NeighborhoodAggregateFunction::Sum,
    };

    // the checked constructor refuses
    assert!(matches!(
        TypedOperator::neighborhood_aggregate(params.clone(), raster_operator()),
        Err(GeopipeError::InvalidNeighborhood { .. })
    ));

    // and a hand-assembled node is caught at workflow construction
    let operator = TypedOperator::NeighborhoodAggregate {
        params,
        sources: RasterSource::new(raster_operator()),
    };
    assert!(Workflow::raster(operator).is_err());

    assert_eq!(registry.workflow_count(), 0);
}

#[tokio::test]
async fn materializing_a_raster_workflow_defaults_to_gradient_symbology() {
    let registry = MemoryRegistry::new();
    let id = register_raster(&registry, raster_operator(), SpatialReference::wgs84()).await;

    let mut project = ActiveProject::new(
        "test",
        SpatialReference::wgs84(),
        Time::from_millis(0, 0).unwrap(),
    );
    let layer = project
        .add_layer_from_workflow(&registry, "elevation", id, None)
        .await
        .unwrap();

    assert_eq!(layer.name, "elevation");
    assert!(layer.is_visible);
    assert!(!layer.is_legend_visible);
    assert!(matches!(layer.metadata, LayerMetadata::Raster(_)));
    assert!(matches!(layer.symbology, Symbology::Raster { .. }));
}

#[tokio::test]
async fn materializing_a_vector_workflow_defaults_by_geometry_type() {
    let registry = MemoryRegistry::new();
    let id = registry
        .register_with_metadata(
            &Workflow::vector(vector_operator()).unwrap(),
            vector_descriptor(SpatialReference::wgs84()),
        )
        .await
        .unwrap();

    let mut project = ActiveProject::new(
        "test",
        SpatialReference::wgs84(),
        Time::from_millis(0, 0).unwrap(),
    );
    let layer = project
        .add_layer_from_workflow(&registry, "points", id, None)
        .await
        .unwrap();

    assert!(matches!(layer.symbology, Symbology::Point { .. }));
}

#[tokio::test]
async fn materializing_a_plot_workflow_fails_and_leaves_the_project_untouched() {
    let registry = MemoryRegistry::new();
    let vector_id = registry
        .register_with_metadata(
            &Workflow::vector(vector_operator()).unwrap(),
            vector_descriptor(SpatialReference::wgs84()),
        )
        .await
        .unwrap();

    let stored = registry.get_workflow(vector_id).await.unwrap();
    let plot_workflow = Workflow::plot(TypedOperator::Statistics {
        params: geopipe_workflow::operator::StatisticsParams {
            column_names: vec!["population".to_string()],
        },
        sources: geopipe_workflow::operator::MultiSource {
            source: vec![stored.operator],
        },
    })
    .unwrap();
    assert_eq!(plot_workflow.workflow_type, WorkflowType::Plot);

    let plot_id = registry
        .register_with_metadata(
            &plot_workflow,
            TypedResultDescriptor::Plot(PlotResultDescriptor {
                spatial_reference: SpatialReference::wgs84(),
            }),
        )
        .await
        .unwrap();

    let mut project = ActiveProject::new(
        "test",
        SpatialReference::wgs84(),
        Time::from_millis(0, 0).unwrap(),
    );
    let result = project
        .add_layer_from_workflow(&registry, "stats", plot_id, None)
        .await;

    assert!(matches!(
        result,
        Err(GeopipeError::NotRenderableAsLayer { .. })
    ));
    assert!(project.layers().is_empty());

    // plots bind through their own list instead
    let plot = project.add_plot("stats", plot_id);
    assert_eq!(plot.workflow_id, plot_id);
}

#[tokio::test]
async fn new_layers_stack_on_top() {
    let registry = MemoryRegistry::new();
    let first = register_raster(&registry, raster_operator(), SpatialReference::wgs84()).await;
    let second = register_raster(&registry, raster_operator(), SpatialReference::wgs84()).await;

    let mut project = ActiveProject::new(
        "test",
        SpatialReference::wgs84(),
        Time::from_millis(0, 0).unwrap(),
    );
    project
        .add_layer_from_workflow(&registry, "bottom", first, None)
        .await
        .unwrap();
    project
        .add_layer_from_workflow(&registry, "top", second, None)
        .await
        .unwrap();

    let names: Vec<&str> = project.layers().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["top", "bottom"]);

    let top_id = project.layers()[0].id;
    assert!(project.remove_layer(top_id));
    assert_eq!(project.layers().len(), 1);
    assert_eq!(project.layers()[0].name, "bottom");
}
