// Minimal demo binary; the regressors live in the library.
// Set RUST_LOG=debug to see per-epoch training output.
use ferrite_regress::{ActivationFunction, LinearRegression, Matrix, MlpRegressor, TrainConfig};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(2024);
    let xs: Vec<f64> = (0..200).map(|_| rng.gen_range(-2.0..2.0)).collect();
    let ys: Vec<f64> = xs.iter().map(|x| 1.0 + 0.8 * x + rng.gen_range(-0.1..0.1)).collect();
    let x = Matrix::from(xs);

    let mut linear = LinearRegression::default();
    let (loss, r2) = linear.fit(&x, &ys)?;
    println!(
        "linear: loss={loss:.5} r2={r2:.5} bias={:.4} weights={:?}",
        linear.bias().unwrap_or_default(),
        linear.weights().unwrap_or_default()
    );

    let mut mlp = MlpRegressor::new(vec![16], ActivationFunction::Tanh)?;
    let history = mlp.fit(&x, &ys, &TrainConfig::new(50, 0.05, 16), &mut rng)?;
    if let Some((loss, r2)) = history.last() {
        println!("mlp:    loss={loss:.5} r2={r2:.5} after {} epochs", history.len());
    }

    Ok(())
}
