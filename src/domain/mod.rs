// Domain layer: field state values and the capability traits every container and model implements.

pub mod model;
pub mod ports;
