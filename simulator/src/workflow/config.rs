use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tripcore::view::{Command, FilterField};
use tripcore::DashboardConfig;

/// A replayable dashboard session: sizing, the command script and the filter
/// values typed in after boot.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub dashboard: DashboardConfig,
    pub commands: Vec<Command>,
    pub filters: BTreeMap<FilterField, String>,
    /// When false the heatmap canvas cannot be acquired.
    pub heatmap_surface: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            dashboard: DashboardConfig::default(),
            commands: vec![Command::Run],
            filters: BTreeMap::new(),
            heatmap_surface: true,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        config
            .dashboard
            .validate()
            .with_context(|| format!("validating workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(commands: Vec<Command>, seed: Option<u64>, scatter_points: usize) -> Self {
        let mut config = Self {
            dashboard: DashboardConfig {
                scatter_points,
                seed,
                ..Default::default()
            },
            ..Default::default()
        };
        if !commands.is_empty() {
            config.commands = commands;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_keeps_default_script_when_empty() {
        let cfg = WorkflowConfig::from_args(Vec::new(), Some(4), 60);
        assert_eq!(cfg.commands, vec![Command::Run]);
        assert_eq!(cfg.dashboard.scatter_points, 60);
        assert_eq!(cfg.dashboard.seed, Some(4));
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"dashboard:\n  seed: 3\n  heatmap_cols: 6\ncommands: [run, reset, run]\nfilters:\n  hour: \"17\"\n  min_fare: \"8\"\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.dashboard.seed, Some(3));
        assert_eq!(cfg.dashboard.heatmap_cols, 6);
        assert_eq!(cfg.dashboard.heatmap_rows, 7);
        assert_eq!(cfg.commands, vec![Command::Run, Command::Reset, Command::Run]);
        assert_eq!(cfg.filters.get(&FilterField::Hour).map(String::as_str), Some("17"));
        assert!(cfg.heatmap_surface);
    }

    #[test]
    fn config_load_rejects_empty_grid() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"dashboard:\n  heatmap_rows: 0\n").unwrap();
        let path = temp.into_temp_path();
        assert!(WorkflowConfig::load(&path).is_err());
    }
}
