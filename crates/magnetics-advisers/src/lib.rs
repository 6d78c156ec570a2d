//! Multi-stage design-search orchestration: core selection, coil
//! synthesis, and the physics-plus-filter evaluation loop that ranks
//! the resulting candidates.

pub mod coil_adviser;
pub mod core_adviser;
pub mod filter;
pub mod filters;
pub mod magnetic_adviser;
