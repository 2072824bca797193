pub mod mse;
pub mod r2;

pub use mse::MseLoss;
pub use r2::regression_scores;
