use crate::config::{DashboardConfig, HOURS_PER_DAY};
use crate::dataset::model::{HeatmapGrid, HourlyRecord, ScatterPoint};
use crate::prelude::DashboardResult;
use crate::sampling::RandomSampler;

pub const TRIPS_BASE: u32 = 250;
pub const TRIPS_SPREAD: u32 = 300;
pub const SPEED_RANGE: (f64, f64) = (20.0, 45.0);
pub const FARE_RANGE: (f64, f64) = (10.0, 20.0);
pub const DISTANCE_RANGE: (f64, f64) = (0.2, 30.0);
pub const TIP_PERCENT_RANGE: (f64, f64) = (5.0, 30.0);

/// Builds the demo dataset by driving a [`RandomSampler`].
pub struct DatasetSynthesizer<S> {
    sampler: S,
}

impl<S: RandomSampler> DatasetSynthesizer<S> {
    pub fn new(sampler: S) -> Self {
        Self { sampler }
    }

    /// Exactly 24 records, index equal to hour.
    pub fn synthesize_hourly(&mut self) -> DashboardResult<Vec<HourlyRecord>> {
        let mut records = Vec::with_capacity(HOURS_PER_DAY);
        for hour in 0..HOURS_PER_DAY as u8 {
            let trips = TRIPS_BASE + self.sampler.uniform_int(TRIPS_SPREAD)?;
            let avg_speed = self.sampler.uniform_real(SPEED_RANGE.0, SPEED_RANGE.1)?;
            let avg_fare = self.sampler.uniform_real(FARE_RANGE.0, FARE_RANGE.1)?;
            records.push(HourlyRecord::new(hour, trips, avg_speed, avg_fare));
        }
        Ok(records)
    }

    pub fn synthesize_scatter(&mut self, count: usize) -> DashboardResult<Vec<ScatterPoint>> {
        (0..count)
            .map(|_| -> DashboardResult<ScatterPoint> {
                let distance = self
                    .sampler
                    .uniform_real(DISTANCE_RANGE.0, DISTANCE_RANGE.1)?;
                let tip_percent = self
                    .sampler
                    .uniform_real(TIP_PERCENT_RANGE.0, TIP_PERCENT_RANGE.1)?;
                Ok(ScatterPoint::new(distance, tip_percent))
            })
            .collect()
    }

    /// Independent uniform draw per cell, filled column by column.
    pub fn synthesize_heatmap(&mut self, cols: usize, rows: usize) -> DashboardResult<HeatmapGrid> {
        let mut values = vec![0.0; cols * rows];
        for col in 0..cols {
            for row in 0..rows {
                values[row * cols + col] = self.sampler.uniform_real(0.0, 1.0)?;
            }
        }
        HeatmapGrid::from_row_major(rows, cols, values)
    }

    /// Hourly set, scatter set and heatmap in one pass, sized by `config`.
    pub fn synthesize(&mut self, config: &DashboardConfig) -> DashboardResult<SyntheticDataset> {
        Ok(SyntheticDataset {
            hourly: self.synthesize_hourly()?,
            scatter: self.synthesize_scatter(config.scatter_points)?,
            heatmap: self.synthesize_heatmap(config.heatmap_cols, config.heatmap_rows)?,
        })
    }
}

/// Everything one populated render needs.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    pub hourly: Vec<HourlyRecord>,
    pub scatter: Vec<ScatterPoint>,
    pub heatmap: HeatmapGrid,
}
