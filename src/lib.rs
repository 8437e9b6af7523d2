pub mod app;
pub mod config;
pub mod entities;
pub mod error;
pub mod external;
pub mod format;
pub mod screens;
pub mod server;
pub mod shell;
