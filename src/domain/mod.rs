// Domain layer: model types, drawing primitives and ports (interfaces).
// Nothing here touches files or a concrete graphics library.

pub mod drawing;
pub mod model;
pub mod ports;
pub mod record;
