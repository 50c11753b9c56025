// Domain layer: value objects and ports. Adapters and core depend on this, never the reverse.

pub mod model;
pub mod ports;
