// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of WattWatch.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use rand::Rng;

/// Pseudo-random source for the per-tick display smoothing.
///
/// The jitter only decorates the displayed price; the threshold
/// classification always works on the unjittered series value. Injecting
/// the source keeps the tick evaluation deterministic under test.
pub trait JitterSource: Send {
    /// Sample in `[-amplitude, +amplitude]`.
    fn sample(&mut self, amplitude: f32) -> f32;
}

/// Production source backed by the thread-local RNG, uniform over the
/// amplitude range.
#[derive(Debug, Default)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn sample(&mut self, amplitude: f32) -> f32 {
        if amplitude <= 0.0 {
            return 0.0;
        }
        rand::thread_rng().gen_range(-amplitude..=amplitude)
    }
}

/// Deterministic source for tests; the configured value is still clamped
/// to the amplitude so it can never exceed what production could produce.
#[derive(Debug)]
pub struct FixedJitter(pub f32);

impl JitterSource for FixedJitter {
    fn sample(&mut self, amplitude: f32) -> f32 {
        self.0.clamp(-amplitude, amplitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_rng_jitter_stays_within_amplitude() {
        let mut source = ThreadRngJitter;
        for _ in 0..1000 {
            let sample = source.sample(0.1);
            assert!((-0.1..=0.1).contains(&sample), "sample {sample} out of range");
        }
    }

    #[test]
    fn zero_amplitude_is_exact() {
        let mut source = ThreadRngJitter;
        assert_eq!(source.sample(0.0), 0.0);
    }

    #[test]
    fn fixed_jitter_is_clamped() {
        let mut source = FixedJitter(5.0);
        assert_eq!(source.sample(0.1), 0.1);
    }
}
