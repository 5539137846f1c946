// Domain layer: track models and ports. Only std/serde plus the crate's error type.

pub mod model;
pub mod ports;
