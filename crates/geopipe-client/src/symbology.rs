//! Display styling of layers, and the defaults applied when a layer is
//! materialized without an explicit symbology.

use rand::Rng;
use serde::{Deserialize, Serialize};

use geopipe_core::models::VectorDataType;

/// `[r, g, b, a]`, each 0..=255.
pub type RgbaColor = [u8; 4];

pub const BLACK: RgbaColor = [0, 0, 0, 255];
pub const WHITE: RgbaColor = [255, 255, 255, 255];

/// Fill colors cycled through for new vector layers.
const DEFAULT_FILL_PALETTE: [RgbaColor; 8] = [
    [27, 158, 119, 255],
    [217, 95, 2, 255],
    [117, 112, 179, 255],
    [231, 41, 138, 255],
    [102, 166, 30, 255],
    [230, 171, 2, 255],
    [166, 118, 29, 255],
    [102, 102, 102, 255],
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub value: f64,
    pub color: RgbaColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Colorizer {
    #[serde(rename_all = "camelCase")]
    LinearGradient {
        breakpoints: Vec<Breakpoint>,
        no_data_color: RgbaColor,
        over_color: RgbaColor,
        under_color: RgbaColor,
    },
    #[serde(rename_all = "camelCase")]
    LogarithmicGradient {
        breakpoints: Vec<Breakpoint>,
        no_data_color: RgbaColor,
        over_color: RgbaColor,
        under_color: RgbaColor,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RasterColorizer {
    #[serde(rename_all = "camelCase")]
    SingleBand {
        band: u32,
        band_colorizer: Colorizer,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColorParam {
    Static { color: RgbaColor },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NumberParam {
    Static { value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeParam {
    pub width: NumberParam,
    pub color: ColorParam,
}

impl StrokeParam {
    fn black(width: f64) -> Self {
        Self {
            width: NumberParam::Static { value: width },
            color: ColorParam::Static { color: BLACK },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Symbology {
    #[serde(rename_all = "camelCase")]
    Raster {
        opacity: f64,
        raster_colorizer: RasterColorizer,
    },
    #[serde(rename_all = "camelCase")]
    Point {
        radius: NumberParam,
        fill_color: ColorParam,
        stroke: StrokeParam,
    },
    #[serde(rename_all = "camelCase")]
    Line {
        stroke: StrokeParam,
        auto_simplified: bool,
    },
    #[serde(rename_all = "camelCase")]
    Polygon {
        fill_color: ColorParam,
        stroke: StrokeParam,
        auto_simplified: bool,
    },
}

impl Symbology {
    /// The default for raster layers: the first band on a black→white
    /// linear gradient at full opacity.
    pub fn default_raster() -> Self {
        Symbology::Raster {
            opacity: 1.0,
            raster_colorizer: RasterColorizer::SingleBand {
                band: 0,
                band_colorizer: Colorizer::LinearGradient {
                    breakpoints: vec![
                        Breakpoint {
                            value: 0.0,
                            color: BLACK,
                        },
                        Breakpoint {
                            value: 255.0,
                            color: WHITE,
                        },
                    ],
                    no_data_color: [0, 0, 0, 0],
                    over_color: WHITE,
                    under_color: BLACK,
                },
            },
        }
    }

    /// The default for vector layers: black stroke and a randomly assigned
    /// fill color, shaped by the geometry type.
    pub fn default_vector(data_type: VectorDataType) -> Self {
        let fill = ColorParam::Static {
            color: random_fill_color(),
        };

        match data_type {
            VectorDataType::MultiLineString => Symbology::Line {
                stroke: StrokeParam::black(1.0),
                auto_simplified: true,
            },
            VectorDataType::MultiPolygon => Symbology::Polygon {
                fill_color: fill,
                stroke: StrokeParam::black(1.0),
                auto_simplified: true,
            },
            // plain data tables get point markers when drawn at all
            VectorDataType::MultiPoint | VectorDataType::Data => Symbology::Point {
                radius: NumberParam::Static { value: 10.0 },
                fill_color: fill,
                stroke: StrokeParam::black(1.0),
            },
        }
    }
}

fn random_fill_color() -> RgbaColor {
    let index = rand::thread_rng().gen_range(0..DEFAULT_FILL_PALETTE.len());
    DEFAULT_FILL_PALETTE[index]
}
