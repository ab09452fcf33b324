//! Stress tests for the pairwise-knn library.
//!
//! These tests check every execution path against a naive full-sort
//! reference on seeded random inputs, and exercise larger workloads.

use ordered_float::OrderedFloat;
use pairwise_knn::prelude::*;
use rand::prelude::*;
use std::sync::Arc;
use std::time::Instant;

/// Generate a random point set with a fixed seed.
fn generate_random_points<T>(n: usize, dim: usize, seed: u64) -> PointSet<T>
where
    T: Scalar,
    rand::distributions::Standard: rand::distributions::Distribution<T>,
{
    random_point_set(n, dim, Some(seed))
}

/// Reference kNN: sort the full row of returned distances and keep k.
fn naive_knn<T: Scalar>(
    source: &PointSet<T>,
    target: &PointSet<T>,
    metric: Metric,
    k: usize,
    exclude_self: bool,
) -> Vec<Vec<Neighbor<T>>> {
    source
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut row: Vec<Neighbor<T>> = target
                .iter()
                .enumerate()
                .filter(|&(j, _)| !(exclude_self && i == j))
                .map(|(j, t)| Neighbor::new(j, metric.distance(s, t)))
                .collect();
            row.sort_by_key(|n| (OrderedFloat(n.distance), n.index));
            row.truncate(k);
            row
        })
        .collect()
}

/// Verify that every row is sorted by (distance, index).
fn verify_sorted<T: Scalar>(result: &NeighborResult<T>) {
    for row in result.iter() {
        for pair in row.windows(2) {
            let a = (OrderedFloat(pair[0].distance), pair[0].index);
            let b = (OrderedFloat(pair[1].distance), pair[1].index);
            assert!(a < b, "Results not sorted: {:?} then {:?}", pair[0], pair[1]);
        }
    }
}

#[test]
fn stress_test_all_paths_match_reference() {
    const N: usize = 150;
    const M: usize = 230;
    const DIM: usize = 9;

    let source: PointSet<f32> = generate_random_points(N, DIM, 42);
    let target: PointSet<f32> = generate_random_points(M, DIM, 123);

    for metric in Metric::ALL {
        for k in [1, 7, 60, M, M + 5] {
            let expected = naive_knn(&source, &target, metric, k, false);

            for strategy in [
                SelectionStrategy::Heap,
                SelectionStrategy::Partition,
                SelectionStrategy::Auto,
            ] {
                for chunk_size in [None, Some(1), Some(33)] {
                    for parallel in [false, true] {
                        let config = KnnConfig::new(k)
                            .with_metric(metric)
                            .with_strategy(strategy)
                            .with_chunk_size(chunk_size)
                            .with_parallel(parallel)
                            .with_parallel_row_threshold(16);
                        let knn = BruteForceKnn::new(config).unwrap();
                        let result = knn.search(&source, &target).unwrap();

                        let matrix = knn.distance_matrix(&source, &target).unwrap();
                        assert_eq!(result, knn.select(&matrix));
                        assert_eq!(
                            result.clone().into_rows(),
                            expected,
                            "metric={} k={} strategy={:?} chunk={:?} parallel={}",
                            metric,
                            k,
                            strategy,
                            chunk_size,
                            parallel
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn stress_test_self_search_matches_reference() {
    const N: usize = 300;
    const DIM: usize = 5;
    const K: usize = 8;

    let points: PointSet<f64> = generate_random_points(N, DIM, 7);

    for metric in Metric::ALL {
        let config = KnnConfig::new(K).with_metric(metric).with_chunk_size(Some(64));
        let result = BruteForceKnn::new(config).unwrap().search_self(&points).unwrap();

        assert_eq!(result.len(), N);
        assert_eq!(result.into_rows(), naive_knn(&points, &points, metric, K, true));
    }
}

#[test]
fn stress_test_brute_force_medium() {
    const N: usize = 2_000;
    const M: usize = 5_000;
    const DIM: usize = 64;
    const K: usize = 10;

    let source: PointSet<f32> = generate_random_points(N, DIM, 42);
    let target: PointSet<f32> = generate_random_points(M, DIM, 123);

    let knn = BruteForceKnn::new(KnnConfig::new(K).with_chunk_size(Some(256))).unwrap();

    let start = Instant::now();
    let result = knn.search(&source, &target).unwrap();
    let elapsed = start.elapsed();

    assert_eq!(result.len(), N);
    assert!(result.iter().all(|row| row.len() == K));
    verify_sorted(&result);

    println!(
        "Brute-force medium: {}x{} in {:?} ({:.2} rows/s)",
        N,
        M,
        elapsed,
        N as f64 / elapsed.as_secs_f64()
    );
}

#[test]
fn stress_test_high_dimensional() {
    const N: usize = 200;
    const DIM: usize = 1_027;
    const K: usize = 5;

    let points: PointSet<f32> = generate_random_points(N, DIM, 99);
    let config = KnnConfig::new(K).with_metric(Metric::L2);
    let result = BruteForceKnn::new(config).unwrap().search_self(&points).unwrap();

    verify_sorted(&result);
    for (i, row) in result.iter().enumerate() {
        assert_eq!(row.len(), K);
        assert!(row.iter().all(|n| n.index != i && n.distance > 0.0));
    }
}

#[test]
fn stress_test_concurrent_queries() {
    const N: usize = 500;
    const DIM: usize = 16;
    const K: usize = 4;
    const NUM_THREADS: usize = 4;

    let points: Arc<PointSet<f32>> = Arc::new(generate_random_points(N, DIM, 3));
    let knn = Arc::new(BruteForceKnn::with_k(K));
    let expected = knn.search_self(&points).unwrap();

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let points = Arc::clone(&points);
            let knn = Arc::clone(&knn);
            std::thread::spawn(move || knn.search_self(&points).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn stress_test_random_nan_injection() {
    const N: usize = 40;
    const M: usize = 120;
    const DIM: usize = 3;

    let mut rng = StdRng::seed_from_u64(17);
    let source: PointSet<f32> = generate_random_points(N, DIM, 1);
    let mut raw = generate_random_points::<f32>(M, DIM, 2).into_raw();
    let mut poisoned = Vec::new();
    for _ in 0..10 {
        let pos = rng.gen_range(0..raw.len());
        raw[pos] = f32::NAN;
        poisoned.push(pos / DIM);
    }
    poisoned.sort_unstable();
    poisoned.dedup();
    let target = PointSet::from_flat(raw, DIM).unwrap();

    let err = BruteForceKnn::with_k(M).search(&source, &target).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NonFiniteInput);

    let config = KnnConfig::new(M).with_non_finite(NonFinitePolicy::Propagate);
    let result = BruteForceKnn::new(config).unwrap().search(&source, &target).unwrap();

    let finite = M - poisoned.len();
    for row in result.iter() {
        assert_eq!(row.len(), M);
        assert!(row[..finite].iter().all(|n| !n.distance.is_nan()));
        let tail: Vec<usize> = row[finite..].iter().map(|n| n.index).collect();
        assert_eq!(tail, poisoned);
    }
}
