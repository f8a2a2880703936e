//! Safe multisig queue monitor
//!

pub mod cli;
pub mod config;
pub mod errors;
pub mod monitor;
pub mod notify;
pub mod service;
pub mod types;
pub mod utils;
