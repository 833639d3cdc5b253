pub mod balancer;
pub mod config;
pub mod error;
pub mod generator;
pub mod scheduler;
pub mod shutdown;
pub mod sim;
pub mod sink;
pub mod worker;

pub use config::SimConfig;
pub use error::{Result, SimError};
pub use sim::{SimReport, Simulation};
