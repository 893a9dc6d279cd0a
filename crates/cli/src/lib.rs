//! Terminal front end for the mortydex character browser.
//!
//! [`shell::Shell`] drives the interactive two-tab browser; [`commands`]
//! holds the one-shot subcommands.

pub mod cli;
pub mod commands;
pub mod config;
pub mod render;
pub mod shell;
