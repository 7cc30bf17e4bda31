pub mod model;
pub mod synth;

pub use model::{HeatmapCell, HeatmapGrid, HourlyRecord, ScatterPoint};
pub use synth::{DatasetSynthesizer, SyntheticDataset};
