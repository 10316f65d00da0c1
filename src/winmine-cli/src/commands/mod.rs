//! Command handlers for the winmine CLI

pub mod configure;
pub mod prompt;
pub mod status;
