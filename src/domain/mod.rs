// Domain layer: component state, wire types and ports.

pub mod model;
pub mod ports;
