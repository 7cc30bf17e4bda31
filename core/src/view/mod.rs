pub mod controller;
pub mod form;
pub mod memory;
pub mod render;
pub mod slot;
pub mod state;

pub use controller::ViewStateController;
pub use form::{FilterField, FilterSnapshot, FormAdapter, FormFields, HourFilter};
pub use memory::MemoryRenderer;
pub use render::{
    ChartDescription, ChartHandle, ChartPoint, ChartRenderer, ChartSlotKind, ComboChart,
    HeatmapCaption, HeatmapSurface, ScatterChart, Series,
};
pub use slot::{ChartSlot, SlotStats};
pub use state::{Command, ViewState};
