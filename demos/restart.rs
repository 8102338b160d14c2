use lloyd::{first_k_centroids, Kmeans};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Fit, then fit again starting from the converged centroids. The second
    // run stops after a single iteration, which is a quick way to confirm a
    // stored centroid set still matches the data it came from. A starved
    // budget is shown last: that run ends too, but reports exhaustion rather
    // than convergence.
    let centers = [(0.0, 0.0), (6.0, 0.0), (3.0, 5.0)];
    let noise = Normal::new(0.0, 0.5)?;
    let mut rng = StdRng::seed_from_u64(1);

    let mut data: Vec<Vec<f64>> = Vec::new();
    for _ in 0..40 {
        for &(cx, cy) in &centers {
            data.push(vec![cx + noise.sample(&mut rng), cy + noise.sample(&mut rng)]);
        }
    }

    let k = centers.len();
    let init = first_k_centroids(&data, k)?;
    let kmeans = Kmeans::new(k).with_seed(21);

    let first = kmeans.fit(&data, &init)?;
    println!(
        "first fit:  iterations={:<3} stop={} (converged={})",
        first.iterations,
        first.stop,
        first.stop.is_converged()
    );

    let refit = kmeans.fit(&data, &first.centroids)?;
    println!(
        "refit:      iterations={:<3} stop={} (converged={})",
        refit.iterations,
        refit.stop,
        refit.stop.is_converged()
    );

    let starved = Kmeans::new(k).with_max_iter(1).with_seed(21).fit(&data, &init)?;
    println!(
        "max_iter=1: iterations={:<3} stop={} (converged={})",
        starved.iterations,
        starved.stop,
        starved.stop.is_converged()
    );

    Ok(())
}
