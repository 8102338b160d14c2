use lloyd::{first_k_centroids, Kmeans};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Four Gaussian blobs in 2D, then a seeded fit starting from the first
    // four rows. Rows are generated round-robin across the blob centers, so
    // the first-k initialization lands one centroid near each blob.
    let centers = [(0.0, 0.0), (8.0, 0.0), (0.0, 8.0), (8.0, 8.0)];
    let noise = Normal::new(0.0, 0.6)?;
    let mut rng = StdRng::seed_from_u64(0);

    let mut data: Vec<Vec<f64>> = Vec::new();
    for _ in 0..50 {
        for &(cx, cy) in &centers {
            data.push(vec![cx + noise.sample(&mut rng), cy + noise.sample(&mut rng)]);
        }
    }

    let k = centers.len();
    let init = first_k_centroids(&data, k)?;
    let fit = Kmeans::new(k)
        .with_max_iter(100)
        .with_tol(1e-6)
        .with_seed(7)
        .fit(&data, &init)?;

    let mut sizes = vec![0usize; k];
    for &label in &fit.labels {
        sizes[label] += 1;
    }

    println!(
        "n={} k={} iterations={} stop={}",
        data.len(),
        k,
        fit.iterations,
        fit.stop
    );
    for (c, z) in fit.centroids.iter().enumerate() {
        println!("  centroid {}: ({:7.3}, {:7.3})  members={}", c, z[0], z[1], sizes[c]);
    }
    println!("objective trace:");
    for (i, j) in fit.objective.iter().enumerate() {
        println!("  iter {:>2}: J={:.6}", i + 1, j);
    }

    Ok(())
}
