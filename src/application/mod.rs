// Application layer - Board rendering, sample rotation and the seams to I/O
pub mod connection_indicator;
pub mod display_service;
pub mod event_log;
pub mod layout;
pub mod message_pane;
pub mod sample_feed;
pub mod sample_provider;
pub mod screen;
pub mod status_board;
pub mod transport;
