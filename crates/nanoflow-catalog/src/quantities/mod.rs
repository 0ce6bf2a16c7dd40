//! Quantity tables

pub mod nanoaod;
pub mod output;
