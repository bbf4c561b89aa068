pub mod engine;
pub mod layout;
pub mod palette;
pub mod pipeline;
pub mod render;

pub use crate::domain::model::{Boundary, ControlVariable, PlanetarySystem};
pub use crate::domain::ports::{Canvas, Pipeline, Storage};
pub use crate::utils::error::Result;
