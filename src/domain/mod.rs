// Domain layer: value types and the transport port the core is written against.

pub mod model;
pub mod ports;
