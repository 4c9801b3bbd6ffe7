// Domain layer: models, ports and the pure ranking/transform services.
// Nothing here touches the filesystem.

pub mod model;
pub mod ports;

pub mod services;
