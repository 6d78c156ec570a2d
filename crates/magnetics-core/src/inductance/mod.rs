pub mod leakage;
pub mod magnetizing;
pub mod matrix;
