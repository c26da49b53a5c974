// Domain layer: the resource contract every screen is built on, and the service port.

pub mod model;
pub mod ports;
