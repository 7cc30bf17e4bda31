use crate::prelude::{DashboardError, DashboardResult};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Aggregates for one hour of the synthetic day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub hour: u8,
    pub trips: u32,
    pub avg_speed: f64,
    pub avg_fare: f64,
}

impl HourlyRecord {
    pub fn new(hour: u8, trips: u32, avg_speed: f64, avg_fare: f64) -> Self {
        Self {
            hour,
            trips,
            avg_speed,
            avg_fare,
        }
    }
}

/// One trip in the distance-vs-tip scatter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub distance: f64,
    pub tip_percent: f64,
}

impl ScatterPoint {
    pub fn new(distance: f64, tip_percent: f64) -> Self {
        Self {
            distance,
            tip_percent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub row: usize,
    pub col: usize,
    pub intensity: f64,
}

impl HeatmapCell {
    /// Fill colour for the cell: dark amber at 0, pale sand at 1.
    pub fn fill_rgb(&self) -> [u8; 3] {
        let v = self.intensity.clamp(0.0, 1.0);
        [
            (55.0 + 200.0 * v).round() as u8,
            (100.0 + 100.0 * v).round() as u8,
            (50.0 + 150.0 * v).round() as u8,
        ]
    }
}

/// Intensity grid indexed `[row, col]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    intensities: Array2<f64>,
}

impl HeatmapGrid {
    pub fn from_row_major(rows: usize, cols: usize, values: Vec<f64>) -> DashboardResult<Self> {
        let intensities = Array2::from_shape_vec((rows, cols), values)
            .map_err(|err| DashboardError::Internal(format!("heatmap shape: {}", err)))?;
        Ok(Self { intensities })
    }

    pub fn rows(&self) -> usize {
        self.intensities.nrows()
    }

    pub fn cols(&self) -> usize {
        self.intensities.ncols()
    }

    pub fn intensity(&self, row: usize, col: usize) -> Option<f64> {
        self.intensities.get((row, col)).copied()
    }

    pub fn cells(&self) -> Vec<HeatmapCell> {
        self.intensities
            .indexed_iter()
            .map(|((row, col), &intensity)| HeatmapCell {
                row,
                col,
                intensity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_enumerates_cells_row_major() {
        let grid = HeatmapGrid::from_row_major(2, 3, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        let cells = grid.cells();
        assert_eq!(cells.len(), 6);
        assert_eq!((cells[4].row, cells[4].col), (1, 1));
        assert_eq!(grid.intensity(1, 2), Some(0.5));
        assert_eq!(grid.intensity(2, 0), None);
    }

    #[test]
    fn grid_rejects_mismatched_shape() {
        assert!(matches!(
            HeatmapGrid::from_row_major(2, 2, vec![0.0; 3]),
            Err(DashboardError::Internal(_))
        ));
    }

    #[test]
    fn fill_colour_spans_ramp() {
        let low = HeatmapCell {
            row: 0,
            col: 0,
            intensity: 0.0,
        };
        let high = HeatmapCell {
            intensity: 1.0,
            ..low
        };
        assert_eq!(low.fill_rgb(), [55, 100, 50]);
        assert_eq!(high.fill_rgb(), [255, 200, 200]);
    }
}
