//! Basic kNN example.
//!
//! This example demonstrates exact k-nearest-neighbor search over a small
//! point set, then a chunked search over random points.

use pairwise_knn::prelude::*;

fn main() -> Result<()> {
    println!("pairwise-knn - Basic Example\n");

    // Create a simple point set of 3D points
    let points = PointSet::from_vecs(vec![
        vec![0.0f32, 0.0, 0.0],  // Point 0: origin
        vec![1.0, 0.0, 0.0],     // Point 1: unit x
        vec![0.0, 1.0, 0.0],     // Point 2: unit y
        vec![0.0, 0.0, 1.0],     // Point 3: unit z
        vec![1.0, 1.0, 1.0],     // Point 4: diagonal
        vec![0.5, 0.5, 0.5],     // Point 5: center
        vec![2.0, 0.0, 0.0],     // Point 6: far x
        vec![-1.0, -1.0, -1.0],  // Point 7: negative diagonal
    ])?;

    println!(
        "Point set: {} points, {} dimensions",
        points.len(),
        points.dimensionality()
    );

    // Every point's 3 nearest neighbors, excluding itself
    let knn = BruteForceKnn::new(KnnConfig::new(3))?;
    let result = knn.search_self(&points)?;

    println!("\n{:>5}  {}", "Point", "Neighbors (index: squared distance)");
    println!("{:-<48}", "");
    for (i, row) in result.iter().enumerate() {
        let neighbors: Vec<String> = row
            .iter()
            .map(|n| format!("{}: {:.3}", n.index, n.distance))
            .collect();
        println!("{:>5}  {}", i, neighbors.join(", "));
    }

    // Demonstrate different metrics on a single query
    println!("\n--- Different Metrics ---\n");

    let query = [0.4f32, 0.4, 0.4];
    for metric in Metric::ALL {
        let knn = BruteForceKnn::new(KnnConfig::new(3).with_metric(metric))?;
        let neighbors = knn.search_one(&query, &points)?;
        let formatted: Vec<String> = neighbors
            .iter()
            .map(|n| format!("{} ({:.4})", n.index, n.distance))
            .collect();
        println!("{:<12} {}", metric.name(), formatted.join(", "));
    }

    // Chunked search over random points
    println!("\n--- Chunked Search ---\n");

    let source: PointSet<f32> = random_point_set(5_000, 8, Some(42));
    let target: PointSet<f32> = random_point_set(2_000, 8, Some(7));
    let config = KnnConfig::new(5)
        .with_metric(Metric::L2)
        .with_chunk_size(Some(512));
    let result = BruteForceKnn::new(config)?.search(&source, &target)?;

    println!(
        "{} source rows, {} neighbors total; row 0 -> {:?}",
        result.len(),
        result.total_neighbors(),
        result.indices(0)
    );

    Ok(())
}
