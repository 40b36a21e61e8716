pub mod logging;
pub mod simulation;

pub use simulation::{LoggingFallback, SimulatedHost, SimulationOptions};
