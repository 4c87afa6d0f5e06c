use std::time::{Duration, Instant};

use ndarray::Array2;
use rand::Rng;

/// One matrix workload: how big, how many live allocations, how many rounds.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadSpec {
    pub size: usize,
    pub copies: usize,
    pub rounds: usize,
}

/// Run repeated normalized matrix products and report the elapsed time.
///
/// `copies` matrices stay allocated for the whole workload; RAM runs hold
/// more of them to push the resident set up.
pub fn run(spec: &WorkloadSpec) -> Duration {
    let start = Instant::now();
    let mut rng = rand::thread_rng();

    let matrices: Vec<Array2<f64>> = (0..spec.copies.max(2))
        .map(|_| Array2::from_shape_fn((spec.size, spec.size), |_| rng.gen::<f64>()))
        .collect();

    let mut result = matrices[0].clone();
    for _ in 0..spec.rounds {
        result = result.dot(&matrices[1]);
        let norm = result.mapv(|v| v * v).sum().sqrt();
        if norm != 0.0 {
            result.mapv_inplace(|v| v / norm);
        }
    }

    start.elapsed()
}
