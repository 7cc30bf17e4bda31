use crate::prelude::DashboardResult;
use crate::view::render::{ChartDescription, ChartHandle, ChartRenderer, ChartSlotKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SlotStats {
    pub created: usize,
    pub disposed: usize,
}

/// Owns at most one live handle for a chart position.
///
/// Installing a new chart always releases the previous handle first, so a
/// stale instance never coexists with its replacement.
#[derive(Debug)]
pub struct ChartSlot {
    kind: ChartSlotKind,
    handle: Option<ChartHandle>,
    stats: SlotStats,
}

impl ChartSlot {
    pub fn new(kind: ChartSlotKind) -> Self {
        Self {
            kind,
            handle: None,
            stats: SlotStats::default(),
        }
    }

    pub fn kind(&self) -> ChartSlotKind {
        self.kind
    }

    pub fn live(&self) -> Option<&ChartHandle> {
        self.handle.as_ref()
    }

    pub fn stats(&self) -> SlotStats {
        self.stats
    }

    /// Disposes the live handle, if any. Returns whether one was released.
    pub fn release<R: ChartRenderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        match self.handle.take() {
            Some(handle) => {
                renderer.dispose(handle);
                self.stats.disposed += 1;
                true
            }
            None => false,
        }
    }

    /// Releases the current chart, then asks the renderer for a new one.
    ///
    /// On failure the slot stays empty.
    pub fn install<R: ChartRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
        description: ChartDescription,
    ) -> DashboardResult<&ChartHandle> {
        self.release(renderer);
        let handle = renderer.create(self.kind, description)?;
        self.stats.created += 1;
        Ok(self.handle.insert(handle))
    }
}
