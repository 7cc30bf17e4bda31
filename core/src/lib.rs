//! Core of the trip analytics dashboard.
//!
//! The crate synthesizes a plausible hourly trip dataset, derives summary
//! KPIs with a small statistics engine, and drives a two-state view
//! controller that owns the lifecycle of three chart artifacts. Rendering and
//! form widgets stay behind the [`view::ChartRenderer`] and
//! [`view::FormAdapter`] seams so the same controller runs headless or inside
//! a GUI.

pub mod config;
pub mod dataset;
pub mod kpi;
pub mod math;
pub mod prelude;
pub mod sampling;
pub mod telemetry;
pub mod view;

pub use config::DashboardConfig;
pub use prelude::{DashboardError, DashboardResult};
pub use view::{Command, ViewState, ViewStateController};
