pub mod cli;
pub mod config;
pub mod errors;
pub mod log;
pub mod normalize;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod server;
pub mod wire;
