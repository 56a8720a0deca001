//! Chao1 exhaustion estimator
//!
//! Extrapolates the total reachable cluster population from the counts of
//! rarely-seen clusters (singletons and doubletons). This is a heuristic:
//! the estimate is not monotonic in N and can transiently dip as f1/f2
//! shift, which callers must report as-is rather than reject.

use serde::{Deserialize, Serialize};

use crate::cluster::FrequencySpectrum;

/// The current exhaustion estimate for a session.
///
/// Always recomputed fresh from a [`FrequencySpectrum`]; never persisted as
/// authoritative state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExhaustionEstimate {
    /// T̂: Chao1-estimated total number of reachable clusters, >= observed
    pub estimated_total: f64,
    /// observed / estimated_total * 100, in (0, 100] once items exist
    pub exhaustion_pct: f64,
}

impl ExhaustionEstimate {
    /// Apply the Chao1 formula to a frequency spectrum.
    ///
    /// With doubletons present: T̂ = u + f1² / (2·f2). Without: the
    /// bias-corrected fallback T̂ = u + f1·(f1−1) / 2, which degenerates to
    /// T̂ = u when f1 <= 1. Exhaustion is 0 when nothing has been observed.
    pub fn from_spectrum(spectrum: &FrequencySpectrum) -> Self {
        let u = spectrum.observed as f64;
        let f1 = spectrum.singletons as f64;
        let f2 = spectrum.doubletons as f64;

        let estimated_total = if spectrum.doubletons == 0 {
            u + f1 * (f1 - 1.0) / 2.0
        } else {
            u + (f1 * f1) / (2.0 * f2)
        };

        // The formula cannot produce T̂ < u for non-negative inputs; a
        // violation here is a programming error.
        debug_assert!(estimated_total >= u);

        let exhaustion_pct = if estimated_total > 0.0 {
            u / estimated_total * 100.0
        } else {
            0.0
        };

        Self {
            estimated_total,
            exhaustion_pct,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum(n: u64, u: u64, f1: u64, f2: u64) -> FrequencySpectrum {
        FrequencySpectrum {
            total_items: n,
            observed: u,
            singletons: f1,
            doubletons: f2,
        }
    }

    #[test]
    fn no_doubletons_uses_fallback_branch() {
        // u=22, f1=20, f2=0 => T̂ = 22 + 20*19/2 = 212
        let est = ExhaustionEstimate::from_spectrum(&spectrum(30, 22, 20, 0));
        assert_eq!(est.estimated_total, 212.0);
    }

    #[test]
    fn doubletons_use_main_branch() {
        // u=42, f1=18, f2=8 => T̂ = 42 + 324/16 = 62.25
        let est = ExhaustionEstimate::from_spectrum(&spectrum(80, 42, 18, 8));
        assert_eq!(est.estimated_total, 62.25);
        assert!((est.exhaustion_pct - 67.469_879_518).abs() < 1e-6);
    }

    #[test]
    fn empty_spectrum_has_zero_exhaustion() {
        let est = ExhaustionEstimate::from_spectrum(&spectrum(0, 0, 0, 0));
        assert_eq!(est.estimated_total, 0.0);
        assert_eq!(est.exhaustion_pct, 0.0);
    }

    #[test]
    fn single_singleton_gives_full_exhaustion() {
        // f1=1, f2=0: zero correction, T̂ = u = 1
        let est = ExhaustionEstimate::from_spectrum(&spectrum(1, 1, 1, 0));
        assert_eq!(est.estimated_total, 1.0);
        assert_eq!(est.exhaustion_pct, 100.0);
    }

    #[test]
    fn fully_repeated_observations_give_full_exhaustion() {
        // One cluster seen 25 times: f1 = f2 = 0, T̂ = u = 1
        let est = ExhaustionEstimate::from_spectrum(&spectrum(25, 1, 0, 0));
        assert_eq!(est.estimated_total, 1.0);
        assert_eq!(est.exhaustion_pct, 100.0);
    }

    #[test]
    fn all_unique_observations_give_low_exhaustion() {
        // 25 distinct clusters: T̂ = 25 + 25*24/2 = 325, exhaustion ~ 7.7%
        let est = ExhaustionEstimate::from_spectrum(&spectrum(25, 25, 25, 0));
        assert_eq!(est.estimated_total, 325.0);
        assert!((est.exhaustion_pct - 7.692_307_692).abs() < 1e-6);
    }

    #[test]
    fn estimate_may_decrease_as_spectrum_shifts() {
        // A doubleton forming can shrink T̂; both values must simply be
        // reported, the engine never treats the dip as an error.
        let before = ExhaustionEstimate::from_spectrum(&spectrum(10, 10, 10, 0));
        let after = ExhaustionEstimate::from_spectrum(&spectrum(11, 10, 8, 1));
        assert!(after.estimated_total < before.estimated_total);
        assert!(after.exhaustion_pct > before.exhaustion_pct);
    }
}
