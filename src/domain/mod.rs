// Domain layer: Morse model and ports (interfaces). No I/O lives here.

pub mod model;
pub mod ports;
