use serde::Serialize;
use tripcore::kpi::KpiDisplay;
use tripcore::sampling::RandomSampler;
use tripcore::view::{
    ChartSlotKind, FilterSnapshot, FormAdapter, MemoryRenderer, SlotStats, ViewState,
};
use tripcore::ViewStateController;

/// What one chart slot currently shows.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSummary {
    pub slot: ChartSlotKind,
    pub handle: Option<u64>,
    pub plotted_points: usize,
    pub stats: SlotStats,
}

/// Serializable picture of the visible dashboard.
#[derive(Debug, Clone, Serialize, Default)]
pub struct VisualizationModel {
    pub state: ViewState,
    pub kpis: KpiDisplay,
    pub peak_hours: Vec<u8>,
    pub filters: FilterSnapshot,
    pub charts: Vec<ChartSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VisualizationModel {
    pub fn capture<F, S>(
        controller: &ViewStateController<MemoryRenderer, F, S>,
        error: Option<String>,
    ) -> Self
    where
        F: FormAdapter,
        S: RandomSampler,
    {
        let charts = ChartSlotKind::ALL
            .iter()
            .map(|&slot| {
                let chart_slot = controller.slot(slot);
                ChartSummary {
                    slot,
                    handle: chart_slot.live().map(|handle| handle.id()),
                    plotted_points: if chart_slot.live().is_some() {
                        controller.renderer().plotted_points(slot)
                    } else {
                        0
                    },
                    stats: chart_slot.stats(),
                }
            })
            .collect();

        Self {
            state: controller.state(),
            kpis: controller.kpis().clone(),
            peak_hours: controller.peak_hours().to_vec(),
            filters: controller.form().read_filters(),
            charts,
            error,
        }
    }

    #[cfg(test)]
    pub fn chart(&self, slot: ChartSlotKind) -> Option<&ChartSummary> {
        self.charts.iter().find(|chart| chart.slot == slot)
    }
}
