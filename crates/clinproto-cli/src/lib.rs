//! clinproto-cli
//!
//! Command-line front end: argument parsing, the route table and its role
//! guard, rendering, and the local config file.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;
pub mod routes;
