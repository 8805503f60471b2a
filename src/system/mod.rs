//! Process bootstrap.
//!
//! This module contains functionality for:
//! - Reading the launch environment once
//! - Command-line argument parsing and validation
//! - The ordered startup sequence that hands control to the UI

pub mod bootstrap;
pub mod cli;
pub mod environment;
