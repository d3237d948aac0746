pub mod api_connection;
pub mod cli;
pub mod dataset;
pub mod engine;
pub mod fallback;
pub mod matcher;
pub mod prompt;
pub mod server;
