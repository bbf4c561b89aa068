// Adapters layer: concrete implementations of the domain ports (data source,
// drawing surfaces, storage).

pub mod csv_source;
pub mod frame;
pub mod plotters_canvas;
pub mod recording;
pub mod storage;
pub mod svg_canvas;

pub use csv_source::RowTable;
pub use plotters_canvas::PlottersCanvas;
pub use recording::{DrawCommand, RecordingCanvas};
pub use storage::{LocalStorage, MemoryStorage};
pub use svg_canvas::SvgCanvas;
