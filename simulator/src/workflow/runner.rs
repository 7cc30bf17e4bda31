use crate::gui_bridge::model::VisualizationModel;
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::warn;
use tripcore::sampling::DefaultSampler;
use tripcore::telemetry::MetricsSnapshot;
use tripcore::view::{Command, FormFields, MemoryRenderer};
use tripcore::ViewStateController;

type HeadlessController = ViewStateController<MemoryRenderer, FormFields, DefaultSampler>;

/// View after one replayed command.
pub struct WorkflowStep {
    pub command: Command,
    pub model: VisualizationModel,
}

pub struct WorkflowResult {
    pub boot: VisualizationModel,
    pub steps: Vec<WorkflowStep>,
    pub metrics: MetricsSnapshot,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Boots a headless dashboard, types the configured filters, then replays
    /// the command script. Render failures are reported per step and do not
    /// stop the script.
    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let mut controller = self.build_controller()?;
        controller.boot().context("booting dashboard")?;
        let boot = VisualizationModel::capture(&controller, None);

        for (field, value) in &self.config.filters {
            controller.form_mut().set(*field, value.clone());
        }
        controller
            .renderer_mut()
            .set_surface_available(self.config.heatmap_surface);

        let mut steps = Vec::with_capacity(self.config.commands.len());
        for &command in &self.config.commands {
            let error = match controller.apply(command) {
                Ok(()) => None,
                Err(err) => {
                    warn!("{} left a partial view: {}", command, err);
                    Some(err.to_string())
                }
            };
            steps.push(WorkflowStep {
                command,
                model: VisualizationModel::capture(&controller, error),
            });
        }

        Ok(WorkflowResult {
            boot,
            steps,
            metrics: controller.metrics(),
        })
    }

    fn build_controller(&self) -> anyhow::Result<HeadlessController> {
        ViewStateController::new(
            MemoryRenderer::new(),
            FormFields::new(),
            DefaultSampler::from_seed_option(self.config.dashboard.seed),
            self.config.dashboard.clone(),
        )
        .context("constructing dashboard controller")
    }
}
