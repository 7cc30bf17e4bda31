use crate::gui_bridge::model::VisualizationModel;
use anyhow::{Context, Result};

/// Publishes dashboard snapshots to stdout, as text or JSON lines.
pub struct GuiBridge {
    json: bool,
}

impl GuiBridge {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn publish(&self, label: &str, model: &VisualizationModel) -> Result<()> {
        if self.json {
            println!("{}", Self::json_line(model)?);
        } else {
            println!(
                "[GUI] {} -> {} | trips {} | avg speed {} | avg fare {} | p95 speed {}",
                label,
                model.state,
                model.kpis.total_trips,
                model.kpis.avg_speed,
                model.kpis.avg_fare,
                model.kpis.p95_speed
            );
            for chart in &model.charts {
                println!(
                    "[GUI]   {:<8} handle {:>4} | points {:>3} | created {} disposed {}",
                    chart.slot.to_string(),
                    chart
                        .handle
                        .map(|id| id.to_string())
                        .unwrap_or_else(|| "-".into()),
                    chart.plotted_points,
                    chart.stats.created,
                    chart.stats.disposed
                );
            }
            if !model.peak_hours.is_empty() {
                println!("[GUI]   peak hours {:?}", model.peak_hours);
            }
            if let Some(error) = &model.error {
                println!("[GUI]   error: {}", error);
            }
        }
        Ok(())
    }

    fn json_line(model: &VisualizationModel) -> Result<String> {
        serde_json::to_string(model).context("serializing dashboard snapshot")
    }

    pub fn publish_status(&self, message: &str) {
        if !self.json {
            println!("[GUI] {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::WorkflowConfig;
    use crate::workflow::runner::Runner;
    use tripcore::view::{Command, ViewState};

    #[test]
    fn json_line_carries_the_published_step() {
        let cfg = WorkflowConfig::from_args(vec![Command::Run], Some(1), 10);
        let result = Runner::new(cfg).execute().unwrap();
        let model = &result.steps[0].model;
        assert_eq!(model.state, ViewState::Populated);

        let line = GuiBridge::json_line(model).unwrap();
        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value, serde_json::to_value(model).unwrap());

        for json in [true, false] {
            let gui = GuiBridge::new(json);
            gui.publish("boot", &result.boot).unwrap();
            gui.publish("run", model).unwrap();
        }
    }
}
