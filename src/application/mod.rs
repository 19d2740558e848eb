mod application;
pub mod data;
mod runtime_config;

pub use application::Application;
pub use runtime_config::RuntimeConfig;
