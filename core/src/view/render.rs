use crate::config::HOURS_PER_DAY;
use crate::dataset::{HeatmapCell, HeatmapGrid, HourlyRecord, ScatterPoint};
use crate::prelude::{DashboardError, DashboardResult};
use serde::Serialize;
use std::fmt;

/// The three fixed artifact positions on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlotKind {
    Hourly,
    Scatter,
    Heatmap,
}

impl ChartSlotKind {
    pub const ALL: [ChartSlotKind; 3] = [
        ChartSlotKind::Hourly,
        ChartSlotKind::Scatter,
        ChartSlotKind::Heatmap,
    ];
}

impl fmt::Display for ChartSlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartSlotKind::Hourly => "hourly",
            ChartSlotKind::Scatter => "scatter",
            ChartSlotKind::Heatmap => "heatmap",
        };
        f.write_str(name)
    }
}

/// Opaque reference to a live renderer instance.
///
/// Not `Clone`: handing it back to [`ChartRenderer::dispose`] consumes it, so a
/// handle can be disposed at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartHandle {
    id: u64,
    slot: ChartSlotKind,
}

impl ChartHandle {
    pub fn new(id: u64, slot: ChartSlotKind) -> Self {
        Self { id, slot }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn slot(&self) -> ChartSlotKind {
        self.slot
    }
}

/// Seam to the charting library.
pub trait ChartRenderer {
    fn create(
        &mut self,
        slot: ChartSlotKind,
        description: ChartDescription,
    ) -> DashboardResult<ChartHandle>;

    fn dispose(&mut self, handle: ChartHandle);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series<T> {
    pub label: String,
    pub values: Vec<T>,
}

/// Trips as bars with average speed overlaid as a line, one category per hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComboChart {
    pub labels: Vec<String>,
    pub bars: Series<u32>,
    pub line: Series<f64>,
}

impl ComboChart {
    pub const BAR_LABEL: &'static str = "Trips";
    pub const LINE_LABEL: &'static str = "Avg Speed (km/h)";

    fn with_values(trips: Vec<u32>, speeds: Vec<f64>) -> Self {
        Self {
            labels: (0..HOURS_PER_DAY).map(|hour| hour.to_string()).collect(),
            bars: Series {
                label: Self::BAR_LABEL.into(),
                values: trips,
            },
            line: Series {
                label: Self::LINE_LABEL.into(),
                values: speeds,
            },
        }
    }

    /// 24 zero bars and a flat zero line.
    pub fn empty() -> Self {
        Self::with_values(vec![0; HOURS_PER_DAY], vec![0.0; HOURS_PER_DAY])
    }

    pub fn from_records(records: &[HourlyRecord]) -> Self {
        Self::with_values(
            records.iter().map(|r| r.trips).collect(),
            records.iter().map(|r| r.avg_speed).collect(),
        )
    }
}

/// Plot coordinate: distance on `x`, tip percentage on `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

impl From<&ScatterPoint> for ChartPoint {
    fn from(point: &ScatterPoint) -> Self {
        Self {
            x: point.distance,
            y: point.tip_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub label: String,
    pub x_title: String,
    pub y_title: String,
    pub points: Vec<ChartPoint>,
}

impl ScatterChart {
    pub fn new(points: &[ScatterPoint]) -> Self {
        Self {
            label: "Tip % vs Distance".into(),
            x_title: "Distance (km)".into(),
            y_title: "Tip %".into(),
            points: points.iter().map(ChartPoint::from).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatmapCaption {
    NoData,
    Demo,
}

impl HeatmapCaption {
    pub fn text(&self) -> &'static str {
        match self {
            HeatmapCaption::NoData => "No data - press Run to generate demo",
            HeatmapCaption::Demo => "Demo heatmap (no live data)",
        }
    }
}

/// Raw paint instructions for the heatmap canvas.
///
/// A blank surface carries no cells and is painted as grid lines only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapSurface {
    pub cols: usize,
    pub rows: usize,
    pub cells: Vec<HeatmapCell>,
    pub caption: HeatmapCaption,
}

impl HeatmapSurface {
    pub fn blank(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: Vec::new(),
            caption: HeatmapCaption::NoData,
        }
    }

    pub fn from_grid(grid: &HeatmapGrid) -> Self {
        Self {
            cols: grid.cols(),
            rows: grid.rows(),
            cells: grid.cells(),
            caption: HeatmapCaption::Demo,
        }
    }
}

/// Declarative description handed to [`ChartRenderer::create`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartDescription {
    Combo(ComboChart),
    Scatter(ScatterChart),
    Heatmap(HeatmapSurface),
}

impl ChartDescription {
    /// Marks that actually paint something: non-zero bars, scatter points,
    /// filled heatmap cells.
    pub fn plotted_points(&self) -> usize {
        match self {
            ChartDescription::Combo(chart) => {
                chart.bars.values.iter().filter(|&&v| v > 0).count()
            }
            ChartDescription::Scatter(chart) => chart.points.len(),
            ChartDescription::Heatmap(surface) => surface.cells.len(),
        }
    }

    pub fn to_json(&self) -> DashboardResult<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|err| DashboardError::Internal(format!("serializing chart: {}", err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_combo_has_24_zero_bars() {
        let chart = ComboChart::empty();
        assert_eq!(chart.labels.len(), 24);
        assert_eq!(chart.labels[23], "23");
        assert!(chart.bars.values.iter().all(|&v| v == 0));
        assert_eq!(ChartDescription::Combo(chart).plotted_points(), 0);
    }

    #[test]
    fn captions_distinguish_modes() {
        let blank = HeatmapSurface::blank(12, 7);
        assert!(blank.cells.is_empty());
        assert!(blank.caption.text().starts_with("No data"));
        assert!(HeatmapCaption::Demo.text().starts_with("Demo heatmap"));
    }

    #[test]
    fn description_serializes_as_tagged_config() {
        let json = ChartDescription::Scatter(ScatterChart::new(&[ScatterPoint::new(1.5, 12.0)]))
            .to_json()
            .unwrap();
        assert_eq!(json["type"], "scatter");
        assert_eq!(json["x_title"], "Distance (km)");
        assert_eq!(json["points"][0]["x"], 1.5);
        assert_eq!(json["points"][0]["y"], 12.0);
        assert!(json["points"][0].get("tip_percent").is_none());
    }
}
