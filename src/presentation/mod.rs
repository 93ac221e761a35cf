// Presentation layer - Remote command protocol and console report
pub mod command_server;
pub mod demo_report;
pub mod protocol;
