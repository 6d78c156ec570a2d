//! Pluggable physical-model kernels for wound magnetic components:
//! reluctance models, magnetic-field-strength models, and fringing
//! models. Each family is a tagged enum dispatched through a small
//! set of pure functions, one per variant.

pub mod field;
pub mod fringing;
pub mod reluctance;
