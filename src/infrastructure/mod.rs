// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod demo_samples;
pub mod logging;
pub mod sample_file;
pub mod tcp_transport;
pub mod terminal;
