// ABOUTME: Library root for skafos - container image acquisition over an engine socket.
// ABOUTME: The CLI binary is in main.rs.

pub mod config;
pub mod engine;
pub mod error;
pub mod image;
pub mod types;
