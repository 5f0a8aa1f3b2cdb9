//! Scripts for deploying the StablecoinEscrow contract.

#![deny(missing_docs)]

pub mod artifacts;
pub mod cli;
pub mod client;
pub mod commands;
pub mod constants;
pub mod errors;
pub mod types;
pub mod utils;
