use std::sync::mpsc;

use ferrite_regress::{ActivationFunction, LinearRegression, Matrix, MlpRegressor, TrainConfig};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut rng = StdRng::seed_from_u64(7);

    // y = sin(x0) + 0.5·x1, which a straight line can only partly explain.
    let rows: Vec<Vec<f64>> = (0..400)
        .map(|_| vec![rng.gen_range(-3.0..3.0), rng.gen_range(-1.0..1.0)])
        .collect();
    let y: Vec<f64> = rows.iter().map(|r| r[0].sin() + 0.5 * r[1]).collect();
    let x = Matrix::from_data(rows)?;

    let mut linear = LinearRegression::new(true);
    let (loss, r2) = linear.fit(&x, &y)?;
    println!("linear regression: loss = {loss:.4}, r2 = {r2:.4}");

    let (tx, rx) = mpsc::channel();
    let config = TrainConfig::new(200, 0.05, 32).with_progress(tx);
    let mut mlp = MlpRegressor::new(vec![32, 16], ActivationFunction::Tanh)?;
    mlp.fit(&x, &y, &config, &mut rng)?;

    for stats in rx.try_iter().filter(|s| s.epoch % 20 == 0) {
        println!("Epoch {}: loss = {:.6}, r2 = {:.4}", stats.epoch, stats.loss, stats.r2);
    }

    let probe = Matrix::from_data(vec![vec![1.0, 0.0], vec![-1.5, 0.5]])?;
    let linear_pred = linear.predict(&probe)?;
    let mlp_pred = mlp.predict(&probe)?;
    for ((row, lp), mp) in probe.data.iter().zip(linear_pred).zip(mlp_pred) {
        let truth = row[0].sin() + 0.5 * row[1];
        println!("Input: {row:?} -> linear {lp:.4}, mlp {mp:.4}, truth {truth:.4}");
    }

    Ok(())
}
