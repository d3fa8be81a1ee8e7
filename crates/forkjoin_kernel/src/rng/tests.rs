//! Tests for the sample generator.

use super::SampleRng;

#[test]
fn test_same_seed_same_stream() {
    let mut a = SampleRng::from_seed(2024);
    let mut b = SampleRng::from_seed(2024);
    for _ in 0..100 {
        assert_eq!(a.sample_cube(), b.sample_cube());
    }
}

#[test]
fn test_different_seeds_differ() {
    let mut a = SampleRng::from_seed(1);
    let mut b = SampleRng::from_seed(2);
    let first_a: Vec<f64> = (0..10).map(|_| a.gen_uniform()).collect();
    let first_b: Vec<f64> = (0..10).map(|_| b.gen_uniform()).collect();
    assert_ne!(first_a, first_b);
}

#[test]
fn test_worker_zero_keeps_base_seed() {
    assert_eq!(SampleRng::for_worker(Some(99), 0).seed(), 99);
}

#[test]
fn test_worker_streams_are_distinct() {
    let seeds: Vec<u64> = (0..16)
        .map(|worker| SampleRng::for_worker(Some(5), worker).seed())
        .collect();
    for i in 0..seeds.len() {
        for j in i + 1..seeds.len() {
            assert_ne!(seeds[i], seeds[j]);
        }
    }
}

#[test]
fn test_entropy_seeded_workers_differ() {
    // Two 64-bit OS draws colliding is not a realistic outcome.
    let a = SampleRng::for_worker(None, 0);
    let b = SampleRng::for_worker(None, 0);
    assert_ne!(a.seed(), b.seed());
}

#[test]
fn test_cube_bounds_and_mean() {
    let mut rng = SampleRng::from_seed(42);
    let n = 100_000;
    let mut sum = 0.0;
    for _ in 0..n {
        let p = rng.sample_cube();
        for c in [p.x, p.y, p.z] {
            assert!((-1.0..1.0).contains(&c));
            sum += c;
        }
    }
    let mean = sum / (3 * n) as f64;
    assert!(mean.abs() < 0.01, "mean {mean}");
}

#[test]
fn test_uniform_bounds() {
    let mut rng = SampleRng::from_seed(42);
    for _ in 0..1_000 {
        let u = rng.gen_uniform();
        assert!((0.0..1.0).contains(&u));
    }
}

#[test]
fn test_fill_symmetric_empty_buffer() {
    let mut rng = SampleRng::from_seed(42);
    let mut buffer: Vec<f64> = Vec::new();
    rng.fill_symmetric(&mut buffer);
    assert!(buffer.is_empty());
}

#[test]
fn test_integer_range_bounds_and_spread() {
    let mut rng = SampleRng::from_seed(8);
    let draws: Vec<i64> = (0..10_000).map(|_| rng.gen_range(-1_000_i64..1_000)).collect();

    assert!(draws.iter().all(|v| (-1_000..1_000).contains(v)));
    assert!(draws.iter().any(|&v| v < -900));
    assert!(draws.iter().any(|&v| v >= 900));

    let mut again = SampleRng::from_seed(8);
    let replay: Vec<i64> = (0..10_000).map(|_| again.gen_range(-1_000_i64..1_000)).collect();
    assert_eq!(draws, replay);
}

#[test]
fn test_integer_range_reaches_full_width() {
    let mut rng = SampleRng::from_seed(3);
    let draws: Vec<i64> = (0..1_000).map(|_| rng.gen_range(i64::MIN..=i64::MAX)).collect();
    // Values far beyond 2^53 appear, and odd values occur.
    assert!(draws.iter().any(|v| v.unsigned_abs() > 1_u64 << 60));
    assert!(draws.iter().any(|v| v % 2 != 0));
}
