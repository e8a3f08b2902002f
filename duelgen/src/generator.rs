//! Linear congruential generator producing one stream of values.
//!
//! `value[0] = (seed * factor) % divisor` and `value[i] = (value[i-1] * factor) % divisor`.
//! Products are formed in `u64` before the modulus; with `divisor <= i32::MAX` and
//! `factor <= u32::MAX` they cannot overflow, and every reduced value fits in `u32`.
//! Parameters outside those ranges are rejected when the generator is built.

use serde::Serialize;

use crate::config::StreamParams;
use crate::errors::{DuelError, DuelResult};
use crate::metrics::{measure, Timed};

/// Largest accepted modulus, so every value fits in `u32`
pub const MAX_DIVISOR: u64 = i32::MAX as u64;

/// Largest accepted multiplier, so `value * factor` fits in `u64`
pub const MAX_FACTOR: u64 = u32::MAX as u64;

/// Iterator over the values of one generator
#[derive(Debug, Clone)]
pub struct Lcg {
    seed: u64,
    previous: u64,
    factor: u64,
    divisor: u64,
}

impl Lcg {
    /// The seed is reduced modulo `divisor` first; `(seed % d) * f % d == seed * f % d`,
    /// so any `u64` seed is accepted without widening the product.
    pub fn new(params: StreamParams, divisor: u64) -> DuelResult<Self> {
        if !(2..=MAX_DIVISOR).contains(&divisor) {
            return Err(DuelError::invalid_config(format!(
                "divisor must be in 2..={}, got {}",
                MAX_DIVISOR, divisor
            )));
        }
        if !(1..=MAX_FACTOR).contains(&params.factor) {
            return Err(DuelError::invalid_config(format!(
                "factor must be in 1..={}, got {}",
                MAX_FACTOR, params.factor
            )));
        }

        Ok(Self {
            seed: params.seed,
            previous: params.seed % divisor,
            factor: params.factor,
            divisor,
        })
    }

    /// Materializes the next `pair_count` values, timed under `label`
    pub fn into_stream(self, label: impl Into<String>, pair_count: usize) -> Timed<Stream> {
        let seed = self.seed;
        measure(label, pair_count, move || {
            let mut values = Vec::with_capacity(pair_count);
            values.extend(self.take(pair_count));
            Stream { seed, values }
        })
    }
}

impl Iterator for Lcg {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        self.previous = (self.previous * self.factor) % self.divisor;
        Some(self.previous as u32)
    }
}

/// A fully materialized sequence produced by one generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stream {
    /// Seed the stream was generated from
    pub seed: u64,
    /// Generated values, each in `[0, divisor)`
    pub values: Vec<u32>,
}

impl Stream {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }
}

/// Produces `pair_count` values from `params`, timed under `label`
pub fn generate_labeled(
    label: impl Into<String>,
    params: StreamParams,
    pair_count: usize,
    divisor: u64,
) -> DuelResult<Timed<Stream>> {
    Ok(Lcg::new(params, divisor)?.into_stream(label, pair_count))
}

/// Produces `pair_count` values from `params`, timed as `generator<seed>`
pub fn generate(
    params: StreamParams,
    pair_count: usize,
    divisor: u64,
) -> DuelResult<Timed<Stream>> {
    generate_labeled(
        format!("generator{}", params.seed),
        params,
        pair_count,
        divisor,
    )
}
