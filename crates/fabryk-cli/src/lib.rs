//! # fabryk-cli
//!
//! Admin CLI for Fabryk ACL resolution.
//!
//! This crate provides the `fabryk` command:
//! - `readers`: readable authorities for nodes in an ACL fixture
//! - `chain`: the resolved inheritance chain of an ACL
//! - `config`: configuration file management

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
