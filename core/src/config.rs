use crate::prelude::{DashboardError, DashboardResult};
use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: usize = 24;
pub const DEFAULT_SCATTER_POINTS: usize = 120;
pub const DEFAULT_HEATMAP_COLS: usize = 12;
pub const DEFAULT_HEATMAP_ROWS: usize = 7;

/// Sizing and seeding knobs for a dashboard instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub scatter_points: usize,
    pub heatmap_cols: usize,
    pub heatmap_rows: usize,
    /// Fixed sampler seed; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            scatter_points: DEFAULT_SCATTER_POINTS,
            heatmap_cols: DEFAULT_HEATMAP_COLS,
            heatmap_rows: DEFAULT_HEATMAP_ROWS,
            seed: None,
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> DashboardResult<()> {
        if self.heatmap_cols == 0 || self.heatmap_rows == 0 {
            return Err(DashboardError::InvalidArgument(format!(
                "heatmap grid {}x{} must be non-empty",
                self.heatmap_cols, self.heatmap_rows
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_layout() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.scatter_points, 120);
        assert_eq!((cfg.heatmap_cols, cfg.heatmap_rows), (12, 7));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: DashboardConfig = serde_json::from_str(r#"{"seed": 9}"#).unwrap();
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.scatter_points, DEFAULT_SCATTER_POINTS);
    }

    #[test]
    fn empty_grid_is_rejected() {
        let cfg = DashboardConfig {
            heatmap_rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(DashboardError::InvalidArgument(_))
        ));
    }
}
