use ferrite_regress::{
    ActivationFunction, LinearRegression, Matrix, MlpRegressor, RegressionError, TrainConfig,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn linear_data(n: usize, rng: &mut StdRng) -> (Matrix, Vec<f64>) {
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|_| vec![rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)])
        .collect();
    let y = rows.iter()
        .map(|r| 0.7 - 1.2 * r[0] + 2.0 * r[1] + rng.gen_range(-0.005..0.005))
        .collect();
    (Matrix::from_data(rows).unwrap(), y)
}

#[test]
fn linear_mlp_converges_to_least_squares_solution() {
    let mut rng = StdRng::seed_from_u64(99);
    let (x, y) = linear_data(128, &mut rng);

    let mut ols = LinearRegression::new(true);
    let (_, ols_r2) = ols.fit(&x, &y).unwrap();

    let mut mlp = MlpRegressor::new(vec![], ActivationFunction::Identity).unwrap();
    let (loss_history, r2_history) = mlp
        .fit(&x, &y, &TrainConfig::new(200, 0.1, 16), &mut rng)
        .unwrap()
        .into_parts();
    assert_eq!(loss_history.len(), 200);
    assert_eq!(r2_history.len(), 200);

    let layer = &mlp.layers().unwrap()[0];
    let ols_w = ols.weights().unwrap();
    for (j, w) in ols_w.iter().enumerate() {
        assert!((layer.weights.data[j][0] - w).abs() < 0.01, "weight {j}: {} vs {w}", layer.weights.data[j][0]);
    }
    assert!((layer.biases.data[0][0] - ols.bias().unwrap()).abs() < 0.01);

    let (_, mlp_r2) = mlp.evaluate(&x, &y).unwrap();
    assert!((mlp_r2 - ols_r2).abs() < 1e-3, "mlp r2 {mlp_r2} vs ols r2 {ols_r2}");
}

#[test]
fn predictions_agree_between_regressors() {
    let mut rng = StdRng::seed_from_u64(5);
    let (x, y) = linear_data(96, &mut rng);
    let mut ols = LinearRegression::default();
    ols.fit(&x, &y).unwrap();
    let mut mlp = MlpRegressor::new(vec![], ActivationFunction::Identity).unwrap();
    mlp.fit(&x, &y, &TrainConfig::new(300, 0.1, 12), &mut rng).unwrap();

    let probe = Matrix::from_data(vec![vec![0.0, 0.0], vec![0.5, -0.5], vec![-0.9, 0.9]]).unwrap();
    let a = ols.predict(&probe).unwrap();
    let b = mlp.predict(&probe).unwrap();
    for (p, q) in a.iter().zip(b.iter()) {
        assert!((p - q).abs() < 0.02, "{p} vs {q}");
    }
}

#[test]
fn flat_feature_vector_is_treated_as_one_column() {
    let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let y: Vec<f64> = xs.iter().map(|x| 4.0 + 0.5 * x).collect();
    let mut ols = LinearRegression::new(true);
    ols.fit(&Matrix::from(xs), &y).unwrap();
    assert_eq!(ols.n_features(), Some(1));
    assert!((ols.weights().unwrap()[0] - 0.5).abs() < 1e-10);
    assert!((ols.bias().unwrap() - 4.0).abs() < 1e-10);
}

#[test]
fn activation_names_drive_construction() {
    let activation: ActivationFunction = "Sigmoid".parse().unwrap();
    let model = MlpRegressor::new(vec![4], activation).unwrap();
    assert_eq!(model.activation(), ActivationFunction::Sigmoid);
    assert_eq!(model.n_layers(), 3);

    let err = "identify".parse::<ActivationFunction>().unwrap_err();
    assert!(matches!(err, RegressionError::InvalidConfiguration(_)));
}

#[test]
fn both_regressors_reject_use_before_fit() {
    let x = Matrix::column(vec![1.0, 2.0]);
    assert_eq!(LinearRegression::default().predict(&x), Err(RegressionError::UnfittedModel));
    assert_eq!(MlpRegressor::default().predict(&x), Err(RegressionError::UnfittedModel));
}
