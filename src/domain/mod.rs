// Domain layer: records, scoring results and ports. No engine logic lives here.

pub mod model;
pub mod ports;
