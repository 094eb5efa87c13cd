pub mod config;
pub mod dirs;
pub mod env_var;
pub mod logging;
#[cfg(test)]
pub mod testing;
pub mod ui;
