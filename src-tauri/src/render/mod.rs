//! Chart descriptors and static capture.
//!
//! The dashboard only produces `ChartSpec`s (categories plus named series).
//! The frontend draws them as SVG; `ChartBoard` remembers what is currently
//! drawn in each exportable slot and rasterizes it on demand for reports.

mod raster;

use std::collections::BTreeMap;

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use raster::{rasterize, SNAPSHOT_HEIGHT, SNAPSHOT_WIDTH};

/// Series colors, in assignment order.
pub const PALETTE: [[u8; 3]; 6] = [
    [46, 125, 50],
    [2, 119, 189],
    [239, 108, 0],
    [142, 36, 170],
    [198, 40, 40],
    [0, 131, 143],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Radar,
    Doughnut,
    Pie,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
    /// CSS hex color, e.g. `#2e7d32`
    pub color: String,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    pub fn new<S: Into<String>>(kind: ChartKind, title: &str, categories: Vec<S>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            categories: categories.into_iter().map(Into::into).collect(),
            series: Vec::new(),
        }
    }

    /// Append a series, colored by its position.
    pub fn with_series(mut self, label: &str, values: Vec<f64>) -> Self {
        let color = hex_color(palette_color(self.series.len()));
        self.series.push(ChartSeries {
            label: label.to_string(),
            values,
            color,
        });
        self
    }

    /// Largest finite value across all series, at least 0.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

pub fn palette_color(index: usize) -> [u8; 3] {
    PALETTE[index % PALETTE.len()]
}

pub fn hex_color([r, g, b]: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Views whose current drawing can be exported as a report page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    /// CO₂ vs cost bars for the ranked set
    EcoOverview,
    /// Best AI material vs a reference-catalog material
    CatalogComparison,
    /// Radar of the best material, or best vs another AI material
    AiComparison,
}

impl ChartSlot {
    /// Page order in the document report.
    pub const EXPORT_ORDER: [ChartSlot; 3] = [
        ChartSlot::EcoOverview,
        ChartSlot::CatalogComparison,
        ChartSlot::AiComparison,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            ChartSlot::EcoOverview => "CO2 vs Cost Comparison",
            ChartSlot::CatalogComparison => "Comparison With Database Material",
            ChartSlot::AiComparison => "AI Material Comparison",
        }
    }
}

/// Static image of a chart's rendered state.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    image: RgbImage,
}

impl ChartImage {
    pub fn new(image: RgbImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Packed 8-bit RGB samples, row-major.
    pub fn rgb_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }
}

/// Source of static chart images for document export.
pub trait ChartCapture {
    /// `Ok(None)` when nothing has been drawn in `slot` yet.
    fn capture(&self, slot: ChartSlot) -> Result<Option<ChartImage>>;
}

/// What each exportable slot currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartBoard {
    drawn: BTreeMap<ChartSlot, ChartSpec>,
}

impl ChartBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `spec` into `slot`, replacing whatever was there.
    pub fn draw(&mut self, slot: ChartSlot, spec: ChartSpec) {
        self.drawn.insert(slot, spec);
    }

    pub fn get(&self, slot: ChartSlot) -> Option<&ChartSpec> {
        self.drawn.get(&slot)
    }

    pub fn is_drawn(&self, slot: ChartSlot) -> bool {
        self.drawn.contains_key(&slot)
    }
}

impl ChartCapture for ChartBoard {
    fn capture(&self, slot: ChartSlot) -> Result<Option<ChartImage>> {
        self.get(slot)
            .map(|spec| rasterize(spec).map(ChartImage::new))
            .transpose()
    }
}
