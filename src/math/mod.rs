pub mod finite_diff;
pub mod integrate;
pub mod rolling;
pub mod savgol;
pub mod stats;
