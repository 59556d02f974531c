//! Core operations.
//!
//! This module contains the work behind each ormtype command, separated
//! from argument parsing and output rendering.

pub mod generate;
pub mod inspect;
pub mod mappings;

pub use generate::{emit, generate};
pub use inspect::inspect;
pub use mappings::mappings;
