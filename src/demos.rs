//! Demonstration groups run by the `micro-bench` binary.
//!
//! Each group exercises a different candidate shape so the binary doubles
//! as a smoke test of the whole pipeline.

use std::hint::black_box;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::registry::BenchmarkRegistry;

/// Reference dot product.
pub fn dot_iter(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Dot product with four independent accumulators.
pub fn dot_unrolled(a: &[f32], b: &[f32]) -> f32 {
    let len = a.len().min(b.len());
    let chunks = len / 4;

    let mut sum = [0.0f32; 4];
    for i in 0..chunks {
        let idx = i * 4;
        sum[0] += a[idx] * b[idx];
        sum[1] += a[idx + 1] * b[idx + 1];
        sum[2] += a[idx + 2] * b[idx + 2];
        sum[3] += a[idx + 3] * b[idx + 3];
    }
    for i in chunks * 4..len {
        sum[0] += a[i] * b[i];
    }

    (sum[0] + sum[1]) + (sum[2] + sum[3])
}

/// Xoroshiro128++ step
#[derive(Clone, Debug)]
pub struct Xoroshiro {
    lo: u64,
    hi: u64,
}

impl Xoroshiro {
    pub fn new(seed: u64) -> Self {
        Self {
            lo: seed | 1,
            hi: seed.rotate_left(32) ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.lo;
        let s1 = self.hi;
        let result = s0.wrapping_add(s1).rotate_left(17).wrapping_add(s0);

        let s1 = s1 ^ s0;
        self.lo = s0.rotate_left(49) ^ s1 ^ (s1 << 21);
        self.hi = s1.rotate_left(28);
        result
    }
}

/// Opcode dispatch through a `match`
#[inline(never)]
pub fn dispatch_match(opcode: u8, value: u32) -> u32 {
    match opcode {
        0 => value,
        1 => value.wrapping_mul(2),
        2 => value.wrapping_mul(3),
        3 => value.wrapping_mul(4),
        4 => value.wrapping_mul(5),
        5 => value.wrapping_mul(6),
        6 => value.wrapping_mul(7),
        7 => value.wrapping_mul(8),
        _ => 0,
    }
}

/// Opcode dispatch through a multiplier table
#[inline(never)]
pub fn dispatch_table(opcode: u8, value: u32) -> u32 {
    const FACTORS: [u32; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
    FACTORS
        .get(opcode as usize)
        .map_or(0, |f| value.wrapping_mul(*f))
}

/// Numbers produced per call by the counted random candidate
const RANDOM_BATCH: u64 = 8;

/// Register every demonstration group.
///
/// `size` is the vector length for the dot product group, `seed` drives the
/// generated inputs.
pub fn register_demos(registry: &mut BenchmarkRegistry<'static>, size: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let a: Vec<f32> = (0..size).map(|_| rng.random_range(-1.0..1.0)).collect();
    let b: Vec<f32> = (0..size).map(|_| rng.random_range(-1.0..1.0)).collect();
    let (a2, b2) = (a.clone(), b.clone());

    // One call = one iteration
    registry
        .baseline("dot_product", "iterator", move || {
            black_box(dot_iter(black_box(&a), black_box(&b)));
        })
        .candidate("dot_product", "unrolled_4x", move || {
            black_box(dot_unrolled(black_box(&a2), black_box(&b2)));
        });

    // Candidates that batch themselves
    let mut xoro = Xoroshiro::new(seed);
    let mut std_rng = StdRng::seed_from_u64(seed);
    registry
        .candidate("random", "xoroshiro128pp", move || {
            for _ in 0..RANDOM_BATCH {
                black_box(xoro.next_u64());
            }
            RANDOM_BATCH
        })
        .candidate("random", "std_rng", move |n: u64| {
            for _ in 0..n {
                black_box(std_rng.next_u64());
            }
            n
        });

    // Candidates that honor the requested count exactly
    registry
        .baseline("dispatch", "match", |n: u64| {
            for i in 0..n {
                black_box(dispatch_match(black_box(i as u8 & 7), i as u32));
            }
        })
        .candidate("dispatch", "table", |n: u64| {
            for i in 0..n {
                black_box(dispatch_table(black_box(i as u8 & 7), i as u32));
            }
        });
}
