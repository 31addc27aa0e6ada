pub mod config;
pub mod logging;

pub mod fetch;
pub mod retry;
pub mod storage;
pub mod sync;
pub mod validate;
