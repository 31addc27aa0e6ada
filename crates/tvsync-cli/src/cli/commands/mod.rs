//! CLI command handlers. Each command is in its own file.

mod check;
mod show_config;
mod sync;

pub use check::run_check;
pub use show_config::run_show_config;
pub use sync::run_sync;
