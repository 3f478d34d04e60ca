//! Step definitions for connection lifecycle BDD scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
