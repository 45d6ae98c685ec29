//! `perch`: command-line front end for the sticky positioning and unit conversion crates.

pub mod commands;
pub mod config;
pub mod simulation;
