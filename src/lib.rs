pub mod clients;
pub mod config;
pub mod domain;
mod routes;
mod startup;
pub mod telemetry;
mod util;

pub use startup::run;
