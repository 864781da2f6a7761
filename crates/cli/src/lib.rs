//! Command-line access to the account model.

pub mod account;
pub mod cli;
pub mod commands;
