//! Drawing a simple random sample of tokens for the self-assessment.

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{errors::EmptyPopulationError, meta::AssessmentMeta, tokens::TokenSet};

/// Default number of tokens to put in an assessment.
pub const DEFAULT_SAMPLE_SIZE: usize = 200;

/// Default seed, so that two people running the tool with no options get the
/// same assessment.
pub const DEFAULT_SEED: u64 = 42;

/// Tokens drawn without replacement from a [`TokenSet`], in draw order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sample {
    /// The sampled tokens.
    pub tokens: Vec<String>,
    /// The seed used to draw them.
    pub seed: u64,
    /// The size of the population they were drawn from.
    pub population: usize,
}

impl Sample {
    /// The number of sampled tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is this sample empty? Never true for a sample returned by [`sample`].
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Metadata describing how this sample was drawn.
    pub fn meta(&self) -> AssessmentMeta {
        AssessmentMeta {
            total_unique_types: self.population,
            sample_size: Some(self.tokens.len()),
            seed: Some(self.seed),
        }
    }
}

/// Draw `min(n_requested, tokens.len())` tokens uniformly at random, without
/// replacement.
///
/// The result depends only on the order of `tokens`, `n_requested` and
/// `seed`. We use a partial Fisher–Yates shuffle driven by a `StdRng` that
/// lives only for the duration of this call. (`StdRng` output is stable for a
/// given `rand` release, so the same seed gives the same sample as long as
/// the `rand` dependency is not upgraded across a breaking version.)
pub fn sample(
    tokens: &TokenSet,
    n_requested: usize,
    seed: u64,
) -> Result<(Sample, AssessmentMeta), EmptyPopulationError> {
    if tokens.is_empty() {
        return Err(EmptyPopulationError);
    }

    let population = tokens.len();
    let n = n_requested.min(population);
    if n < n_requested {
        debug!(
            "requested {} tokens but only {} exist; sampling all of them",
            n_requested, population
        );
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pool: Vec<&String> = tokens.as_slice().iter().collect();
    for i in 0..n {
        let j = rng.random_range(i..population);
        pool.swap(i, j);
    }

    let sample = Sample {
        tokens: pool.into_iter().take(n).cloned().collect(),
        seed,
        population,
    };
    let meta = sample.meta();
    Ok((sample, meta))
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    fn numbered_tokens(count: usize) -> TokenSet {
        TokenSet::from_lines((0..count).map(|i| format!("சொல்{}", i)))
    }

    #[test]
    fn empty_population_is_an_error() {
        let err = sample(&TokenSet::default(), 10, DEFAULT_SEED).unwrap_err();
        assert_eq!(err, EmptyPopulationError);
    }

    #[test]
    fn same_seed_same_sample() {
        let tokens = numbered_tokens(500);
        for seed in [0, 1, 42, u64::MAX] {
            let (a, _) = sample(&tokens, 50, seed).unwrap();
            let (b, _) = sample(&tokens, 50, seed).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_usually_differ() {
        let tokens = numbered_tokens(500);
        let (a, _) = sample(&tokens, 50, 1).unwrap();
        let (b, _) = sample(&tokens, 50, 2).unwrap();
        assert_ne!(a.tokens, b.tokens);
    }

    #[test]
    fn sample_has_no_repeats_and_comes_from_population() {
        let tokens = numbered_tokens(300);
        let population: HashSet<&str> = tokens.iter().collect();
        let (s, meta) = sample(&tokens, 120, 9).unwrap();
        let drawn: HashSet<&str> = s.tokens.iter().map(|t| t.as_str()).collect();
        assert_eq!(drawn.len(), 120);
        assert!(drawn.is_subset(&population));
        assert_eq!(
            meta,
            AssessmentMeta {
                total_unique_types: 300,
                sample_size: Some(120),
                seed: Some(9),
            }
        );
    }

    #[test]
    fn oversized_request_returns_every_token_once() {
        let tokens = numbered_tokens(7);
        let (s, meta) = sample(&tokens, 200, DEFAULT_SEED).unwrap();
        assert_eq!(s.len(), 7);
        assert_eq!(meta.sample_size, Some(7));
        assert_eq!(meta.total_unique_types, 7);
        let mut drawn = s.tokens.clone();
        drawn.sort();
        let mut all: Vec<String> = tokens.as_slice().to_vec();
        all.sort();
        assert_eq!(drawn, all);
    }

    #[test]
    fn effective_size_is_min_of_request_and_population() {
        let tokens = numbered_tokens(25);
        for requested in [0, 1, 24, 25, 26, 1000] {
            let (s, meta) = sample(&tokens, requested, 3).unwrap();
            assert_eq!(s.len(), requested.min(25));
            assert_eq!(meta.sample_size, Some(requested.min(25)));
        }
    }

    #[test]
    fn every_token_is_about_equally_likely() {
        let tokens = numbered_tokens(4);
        let mut counts = [0usize; 4];
        for seed in 0..4000 {
            let (s, _) = sample(&tokens, 1, seed).unwrap();
            let idx = tokens.iter().position(|t| t == s.tokens[0]).unwrap();
            counts[idx] += 1;
        }
        for count in counts {
            assert!((850..=1150).contains(&count), "skewed counts: {:?}", counts);
        }
    }
}
