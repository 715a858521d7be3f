//! Command implementations.

mod config;
mod run;
mod show;

pub use config::execute_config;
pub use run::execute_run;
pub use show::execute_show;
