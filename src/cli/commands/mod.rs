pub mod config;
pub mod run;
pub mod show;

pub use config::config_command;
pub use run::run_command;
pub use show::show_command;
