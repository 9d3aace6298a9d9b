mod config;
mod logging;
mod rules;

pub use config::load_config;
pub use logging::init_logging;
pub use rules::load_rules;
