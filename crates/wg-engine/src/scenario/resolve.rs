//! Outcome resolution: threshold partition, weighted draw, then lookup by
//! target name.

use tracing::trace;

use crate::journey::Journey;
use crate::outcome::Outcome;
use crate::rng::RandomSource;

/// How to pick among an event's outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeCriteria {
    /// Draw by weight even when no threshold gated the candidates.
    pub randomly: bool,
    /// Target to fall back to when the draw yields nothing.
    pub by_table_name: Option<String>,
}

impl OutcomeCriteria {
    /// Always draw by weight. This is what traversal uses.
    pub fn random() -> Self {
        Self {
            randomly: true,
            by_table_name: None,
        }
    }

    /// Prefer the outcome targeting `name` unless thresholds decide.
    pub fn by_table_name(name: impl Into<String>) -> Self {
        Self {
            randomly: false,
            by_table_name: Some(name.into()),
        }
    }

    /// Set the fallback target.
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.by_table_name = Some(name.into());
        self
    }
}

/// Candidates left after threshold filtering.
#[derive(Debug)]
pub(crate) struct Candidates<'a> {
    pub outcomes: Vec<&'a Outcome>,
    /// True when the candidates passed explicit thresholds.
    pub gated: bool,
}

/// Filter outcomes by thresholds.
///
/// If any outcome carries thresholds, only those whose every threshold holds
/// are candidates. When none of them hold, the unconditional outcomes are.
pub(crate) fn possible_outcomes<'a>(outcomes: &'a [Outcome], journey: &Journey) -> Candidates<'a> {
    if !outcomes.iter().any(Outcome::has_thresholds) {
        return Candidates {
            outcomes: outcomes.iter().collect(),
            gated: false,
        };
    }

    let met: Vec<&Outcome> = outcomes
        .iter()
        .filter(|o| o.has_thresholds() && journey.is_activated(&o.thresholds))
        .collect();
    if met.is_empty() {
        Candidates {
            outcomes: outcomes.iter().filter(|o| !o.has_thresholds()).collect(),
            gated: false,
        }
    } else {
        Candidates {
            outcomes: met,
            gated: true,
        }
    }
}

/// Cumulative weighted draw. Consumes exactly one `random()` when
/// `candidates` is non-empty. Outcomes with no weight are never picked.
pub(crate) fn weighted_pick<'a, R>(candidates: &[&'a Outcome], rng: &mut R) -> Option<&'a Outcome>
where
    R: RandomSource + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }
    let total: f64 = candidates
        .iter()
        .map(|o| o.likelihood)
        .filter(|l| *l > 0.0)
        .sum();
    let r = rng.random() * total;
    if total <= 0.0 {
        return None;
    }

    let mut cumulative = 0.0;
    for outcome in candidates.iter().filter(|o| o.likelihood > 0.0) {
        cumulative += outcome.likelihood;
        if r <= cumulative {
            return Some(outcome);
        }
    }
    None
}

/// Pick the next outcome.
///
/// Without criteria this is a plain weighted draw over every outcome. With
/// criteria the candidates are threshold-filtered first; they are drawn from
/// when the thresholds decided them or `randomly` is set, and otherwise (or
/// when the draw fails) the first outcome targeting `by_table_name` wins.
pub(crate) fn resolve<'a, R>(
    outcomes: &'a [Outcome],
    criteria: Option<&OutcomeCriteria>,
    journey: &Journey,
    rng: &mut R,
) -> Option<&'a Outcome>
where
    R: RandomSource + ?Sized,
{
    let Some(criteria) = criteria else {
        let all: Vec<&Outcome> = outcomes.iter().collect();
        return weighted_pick(&all, rng);
    };

    let candidates = possible_outcomes(outcomes, journey);
    trace!(
        candidates = candidates.outcomes.len(),
        gated = candidates.gated,
        "possible outcomes"
    );
    if candidates.outcomes.is_empty() {
        return None;
    }

    let drawn = if candidates.gated || criteria.randomly {
        weighted_pick(&candidates.outcomes, rng)
    } else {
        None
    };
    drawn.or_else(|| {
        let name = criteria.by_table_name.as_deref()?;
        outcomes.iter().find(|o| o.table_name == name)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::TagSpec;

    /// Returns the same fraction forever and counts draws.
    struct Fixed {
        value: f64,
        draws: usize,
    }

    impl Fixed {
        fn new(value: f64) -> Self {
            Self { value, draws: 0 }
        }
    }

    impl RandomSource for Fixed {
        fn random(&mut self) -> f64 {
            self.draws += 1;
            self.value
        }
    }

    fn journey_with(pairs: &[(&str, i64)]) -> Journey {
        let mut journey = Journey::new();
        for (name, value) in pairs {
            journey.tags_mut().add(name, *value);
        }
        journey
    }

    #[test]
    fn threshold_beats_heavier_sibling() {
        let outcomes = vec![
            Outcome::new(9.0, "WeakPath"),
            Outcome::new(1.0, "StrongPath").with_thresholds([("power", 10)]),
        ];
        let journey = journey_with(&[("power", 10)]);
        for value in [0.0, 0.5, 0.999] {
            let picked = resolve(
                &outcomes,
                Some(&OutcomeCriteria::random()),
                &journey,
                &mut Fixed::new(value),
            );
            assert_eq!(picked.map(|o| o.table_name.as_str()), Some("StrongPath"));
        }
    }

    #[test]
    fn unmet_thresholds_fall_back_to_unconditional() {
        let outcomes = vec![
            Outcome::new(1.0, "Boss").with_thresholds([("danger", 10), ("treasure", 15)]),
            Outcome::new(0.1, "Victory"),
            Outcome::new(0.9, "Defeat"),
        ];
        let journey = journey_with(&[("danger", 10), ("treasure", 14)]);
        let candidates = possible_outcomes(&outcomes, &journey);
        assert!(!candidates.gated);
        assert_eq!(candidates.outcomes.len(), 2);

        let picked = resolve(
            &outcomes,
            Some(&OutcomeCriteria::random()),
            &journey,
            &mut Fixed::new(0.5),
        );
        assert_eq!(picked.map(|o| o.table_name.as_str()), Some("Defeat"));
    }

    #[test]
    fn unmet_thresholds_without_fallback_resolve_nothing() {
        let outcomes = vec![Outcome::new(1.0, "OceanBiome").with_thresholds([("island", 1)])];
        let mut rng = Fixed::new(0.5);
        let picked = resolve(
            &outcomes,
            Some(&OutcomeCriteria::random()),
            &Journey::new(),
            &mut rng,
        );
        assert!(picked.is_none());
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn computed_thresholds_see_journey() {
        let outcomes = vec![
            Outcome::new(1.0, "Calm"),
            Outcome::new(1.0, "Ambush").with_thresholds(TagSpec::computed(|j| {
                if j.tags().get("noise") > 2 {
                    TagSpec::none()
                } else {
                    TagSpec::from([("never", 1)])
                }
            })),
        ];
        let loud = journey_with(&[("noise", 3)]);
        let criteria = OutcomeCriteria::random();
        let picked = resolve(&outcomes, Some(&criteria), &loud, &mut Fixed::new(0.0));
        assert_eq!(picked.map(|o| o.table_name.as_str()), Some("Ambush"));

        let quiet = journey_with(&[("noise", 1)]);
        let picked = resolve(&outcomes, Some(&criteria), &quiet, &mut Fixed::new(0.0));
        assert_eq!(picked.map(|o| o.table_name.as_str()), Some("Calm"));
    }

    #[test]
    fn cumulative_boundary_is_inclusive() {
        let a = Outcome::new(1.0, "A");
        let b = Outcome::new(1.0, "B");
        let candidates = vec![&a, &b];
        // 0.5 * 2.0 == 1.0 lands on A's upper edge.
        assert_eq!(
            weighted_pick(&candidates, &mut Fixed::new(0.5)).map(|o| o.table_name.as_str()),
            Some("A")
        );
        assert_eq!(
            weighted_pick(&candidates, &mut Fixed::new(0.51)).map(|o| o.table_name.as_str()),
            Some("B")
        );
    }

    #[test]
    fn zero_weight_is_skipped() {
        let zero = Outcome::new(0.0, "Never");
        let one = Outcome::new(1.0, "Always");
        let candidates = vec![&zero, &one];
        let picked = weighted_pick(&candidates, &mut Fixed::new(0.0));
        assert_eq!(picked.map(|o| o.table_name.as_str()), Some("Always"));
    }

    #[test]
    fn all_zero_uses_table_name_fallback() {
        let outcomes = vec![Outcome::new(0.0, "Left"), Outcome::new(0.0, "Right")];
        let mut rng = Fixed::new(0.3);
        let criteria = OutcomeCriteria::random().with_table_name("Right");
        let picked = resolve(&outcomes, Some(&criteria), &Journey::new(), &mut rng);
        assert_eq!(picked.map(|o| o.table_name.as_str()), Some("Right"));
        assert_eq!(rng.draws, 1);

        let criteria = OutcomeCriteria::random();
        let picked = resolve(&outcomes, Some(&criteria), &Journey::new(), &mut rng);
        assert!(picked.is_none());
    }

    #[test]
    fn by_name_without_draw() {
        let outcomes = vec![Outcome::new(1.0, "Left"), Outcome::new(1.0, "Right")];
        let mut rng = Fixed::new(0.0);
        let picked = resolve(
            &outcomes,
            Some(&OutcomeCriteria::by_table_name("Right")),
            &Journey::new(),
            &mut rng,
        );
        assert_eq!(picked.map(|o| o.table_name.as_str()), Some("Right"));
        assert_eq!(rng.draws, 0);
    }

    #[test]
    fn no_criteria_draws_over_everything() {
        let outcomes = vec![
            Outcome::new(1.0, "Gated").with_thresholds([("key", 1)]),
            Outcome::new(1.0, "Open"),
        ];
        let picked = resolve(&outcomes, None, &Journey::new(), &mut Fixed::new(0.1));
        assert_eq!(picked.map(|o| o.table_name.as_str()), Some("Gated"));
    }

    #[test]
    fn empty_event_draws_nothing() {
        let mut rng = Fixed::new(0.5);
        let criteria = OutcomeCriteria::random();
        assert!(resolve(&[], Some(&criteria), &Journey::new(), &mut rng).is_none());
        assert!(resolve(&[], None, &Journey::new(), &mut rng).is_none());
        assert_eq!(rng.draws, 0);
    }
}
