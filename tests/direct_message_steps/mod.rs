//! Step definitions for direct message BDD scenarios.

pub mod given;
pub mod then;
pub mod world;
