pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, MemoryStorage, PlottersCanvas, RecordingCanvas, SvgCanvas};
pub use config::{PlotConfig, RenderBackend};
pub use core::{engine::PlotEngine, pipeline::PlotPipeline, render::RenderOptions};
pub use domain::model::{Boundary, ControlVariable, PlanetarySystem, RiskZone, RiskZoneFormula};
pub use utils::error::{PlotError, Result};
