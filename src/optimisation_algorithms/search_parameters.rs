use std::time::Duration;

/// A fallback bound that is large enough for puzzle-sized inputs. The derived bound never goes below it.
pub const DEFAULT_FIXED_FALLBACK_UPPER_BOUND: u64 = 50_000;

/// Upper bound for a free variable that no equation bounds from above.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FallbackBound {
    /// The larger of DEFAULT_FIXED_FALLBACK_UPPER_BOUND and sum of |b_i| * largest |a_ij|, computed per system and
    /// capped at u64::MAX.
    #[default]
    Derived,
    Fixed(u64),
}

impl FallbackBound {
    pub fn resolve(&self, a: &[Vec<i64>], b: &[i64]) -> i128 {
        match self {
            FallbackBound::Fixed(bound) => *bound as i128,
            FallbackBound::Derived => {
                let targets = b
                    .iter()
                    .map(|value| value.unsigned_abs() as i128)
                    .sum::<i128>()
                    .max(1);
                let coefficients = a
                    .iter()
                    .flatten()
                    .map(|value| value.unsigned_abs() as i128)
                    .max()
                    .unwrap_or(0)
                    .max(1);
                targets
                    .saturating_mul(coefficients)
                    .max(DEFAULT_FIXED_FALLBACK_UPPER_BOUND as i128)
                    .min(u64::MAX as i128)
            }
        }
    }
}

/// Tuning and limits of the free-variable search. The default has a derived fallback bound and no limits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchParameters {
    pub fallback_upper_bound: FallbackBound,
    pub node_budget: Option<u64>,
    pub time_limit: Option<Duration>,
}

impl SearchParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback_upper_bound(mut self, bound: FallbackBound) -> Self {
        self.fallback_upper_bound = bound;
        self
    }

    /// Give up after visiting this many nodes of the search tree.
    pub fn with_node_budget(mut self, nodes: u64) -> Self {
        self.node_budget = Some(nodes);
        self
    }

    /// Give up after this much wall-clock time.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DEFAULT_FIXED_FALLBACK_UPPER_BOUND, FallbackBound, SearchParameters};

    #[test]
    fn fallback_bound_derived() {
        let a = vec![vec![1, -3], vec![2, 0]];
        let b = vec![4, -6];
        assert_eq!(FallbackBound::Derived.resolve(&a, &b), 50_000);
        assert_eq!(FallbackBound::Derived.resolve(&[vec![0]], &[0]), 50_000);
        assert_eq!(FallbackBound::Derived.resolve(&[], &[]), 50_000);

        let b = vec![40_000, -6];
        assert_eq!(FallbackBound::Derived.resolve(&a, &b), 120_018);
        assert_eq!(
            FallbackBound::Derived.resolve(&[vec![i64::MAX]], &[i64::MIN]),
            u64::MAX as i128
        );
    }

    #[test]
    fn fallback_bound_fixed() {
        assert_eq!(
            FallbackBound::Fixed(DEFAULT_FIXED_FALLBACK_UPPER_BOUND).resolve(&[vec![1]], &[1]),
            50_000
        );
    }

    #[test]
    fn parameters_builder() {
        let parameters = SearchParameters::new()
            .with_fallback_upper_bound(FallbackBound::Fixed(10))
            .with_node_budget(100)
            .with_time_limit(Duration::from_secs(2));
        assert_eq!(parameters.fallback_upper_bound, FallbackBound::Fixed(10));
        assert_eq!(parameters.node_budget, Some(100));
        assert_eq!(parameters.time_limit, Some(Duration::from_secs(2)));

        let default = SearchParameters::default();
        assert_eq!(default.fallback_upper_bound, FallbackBound::Derived);
        assert_eq!(default.node_budget, None);
        assert_eq!(default.time_limit, None);
    }
}
