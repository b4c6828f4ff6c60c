// Domain layer: response shapes and the seams the client talks through.

pub mod model;
pub mod ports;
