// Domain layer: attendance models and ports (interfaces).

pub mod model;
pub mod ports;
