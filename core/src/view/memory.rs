use crate::prelude::{DashboardError, DashboardResult};
use crate::telemetry::LogManager;
use crate::view::render::{ChartDescription, ChartHandle, ChartRenderer, ChartSlotKind};
use std::collections::BTreeMap;

/// Headless renderer that keeps every live description in memory.
///
/// Used by the simulator and by tests to observe exactly what is on screen.
#[derive(Debug)]
pub struct MemoryRenderer {
    next_id: u64,
    live: BTreeMap<u64, (ChartSlotKind, ChartDescription)>,
    created: usize,
    disposed: usize,
    surface_available: bool,
    logger: LogManager,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            live: BTreeMap::new(),
            created: 0,
            disposed: 0,
            surface_available: true,
            logger: LogManager::new("memory-renderer"),
        }
    }

    /// When false, heatmap creation fails as if the canvas could not be acquired.
    pub fn set_surface_available(&mut self, available: bool) {
        self.surface_available = available;
    }

    pub fn live_count(&self, slot: ChartSlotKind) -> usize {
        self.live.values().filter(|(kind, _)| *kind == slot).count()
    }

    pub fn total_live(&self) -> usize {
        self.live.len()
    }

    /// Most recently created live description for `slot`.
    pub fn description(&self, slot: ChartSlotKind) -> Option<&ChartDescription> {
        self.live
            .values()
            .rev()
            .find(|(kind, _)| *kind == slot)
            .map(|(_, description)| description)
    }

    pub fn plotted_points(&self, slot: ChartSlotKind) -> usize {
        self.description(slot)
            .map(ChartDescription::plotted_points)
            .unwrap_or(0)
    }

    pub fn created(&self) -> usize {
        self.created
    }

    pub fn disposed(&self) -> usize {
        self.disposed
    }
}

impl Default for MemoryRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for MemoryRenderer {
    fn create(
        &mut self,
        slot: ChartSlotKind,
        description: ChartDescription,
    ) -> DashboardResult<ChartHandle> {
        if !self.surface_available && matches!(description, ChartDescription::Heatmap(_)) {
            return Err(DashboardError::RenderTargetUnavailable(
                "heatmap canvas could not be acquired".into(),
            ));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, (slot, description));
        self.created += 1;
        Ok(ChartHandle::new(id, slot))
    }

    fn dispose(&mut self, handle: ChartHandle) {
        if self.live.remove(&handle.id()).is_some() {
            self.disposed += 1;
        } else {
            self.logger
                .warn(&format!("dispose of unknown handle {}", handle.id()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::render::ScatterChart;

    #[test]
    fn unknown_dispose_is_ignored() {
        let mut renderer = MemoryRenderer::new();
        let handle = renderer
            .create(
                ChartSlotKind::Scatter,
                ChartDescription::Scatter(ScatterChart::empty()),
            )
            .unwrap();
        let id = handle.id();
        renderer.dispose(handle);
        renderer.dispose(ChartHandle::new(id, ChartSlotKind::Scatter));
        renderer.dispose(ChartHandle::new(99, ChartSlotKind::Hourly));
        assert_eq!(renderer.created(), 1);
        assert_eq!(renderer.disposed(), 1);
        assert_eq!(renderer.total_live(), 0);
    }
}
