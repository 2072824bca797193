pub mod matrix;
pub mod solve;

pub use matrix::Matrix;
pub use solve::{solve, solve_normal_equations};
