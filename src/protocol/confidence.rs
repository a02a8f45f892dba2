//! Round-count derivation and confidence estimates.
//!
//! A prover holding an improper coloring has at least one monochromatic edge,
//! and a uniform challenge hits it with probability at least `1/E` per round.
//! Its chance of surviving `R` independent rounds is therefore at most
//! `(1 - 1/E)^R`, which is approximated by `e^(-R/E)`.
//!
//! [`confidence`] reports `1 - e^(-R/E)`. This is the approximation, not the
//! exact bound given by [`soundness_bound`], and it is kept as is so reported
//! figures stay comparable with earlier runs. Whether the exact bound was the
//! intended semantics is still open.

use crate::error::{ProtocolError, Result};

/// Rounds needed so that `e^(-R/E) <= 1 - target`, i.e. `ceil(-E * ln(1 - target))`.
pub fn required_rounds(edge_count: usize, target: f64) -> Result<u64> {
    if edge_count == 0 {
        return Err(ProtocolError::EmptyEdgeSet);
    }
    if !(target > 0.0 && target < 1.0) {
        return Err(ProtocolError::InvalidParameter(format!(
            "confidence target {target} must lie strictly between 0 and 1"
        )));
    }
    let rounds = (-(edge_count as f64) * (1.0 - target).ln()).ceil();
    if !rounds.is_finite() || rounds > u64::MAX as f64 {
        return Err(ProtocolError::InvalidParameter(format!(
            "confidence target {target} needs an unbounded number of rounds"
        )));
    }
    Ok((rounds as u64).max(1))
}

/// Heuristic confidence `1 - e^(-rounds/edges)`; 0 when either count is 0.
pub fn confidence(successful_rounds: u64, total_edges: usize) -> f64 {
    if successful_rounds == 0 || total_edges == 0 {
        return 0.0;
    }
    1.0 - (-(successful_rounds as f64) / total_edges as f64).exp()
}

/// Upper bound `(1 - 1/E)^R` on the probability that a prover with an
/// improper coloring passes `rounds` rounds.
pub fn soundness_bound(rounds: u64, total_edges: usize) -> f64 {
    if total_edges == 0 {
        return 1.0;
    }
    let survive = 1.0 - 1.0 / total_edges as f64;
    survive.powf(rounds as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rounds_or_edges_give_zero_confidence() {
        assert_eq!(confidence(0, 10), 0.0);
        assert_eq!(confidence(10, 0), 0.0);
    }

    #[test]
    fn rounds_equal_to_edges_give_one_minus_inverse_e() {
        let value = confidence(10, 10);
        assert!((value - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
        assert!((value - 0.632).abs() < 1e-3);
    }

    #[test]
    fn required_rounds_matches_closed_form() {
        let rounds = required_rounds(4950, 0.999_998).expect("valid parameters");
        let expected = (-4950.0 * (1.0f64 - 0.999_998).ln()).ceil() as u64;
        assert_eq!(rounds, expected);
        assert!((64_900..=65_000).contains(&rounds));
    }

    #[test]
    fn required_rounds_reach_the_target() {
        for edges in [1usize, 3, 17, 250] {
            for target in [0.5, 0.9, 0.999] {
                let rounds = required_rounds(edges, target).expect("valid parameters");
                assert!(confidence(rounds, edges) >= target - 1e-9);
            }
        }
    }

    #[test]
    fn required_rounds_rejects_bad_parameters() {
        assert!(required_rounds(0, 0.9).is_err());
        assert!(required_rounds(5, 0.0).is_err());
        assert!(required_rounds(5, 1.0).is_err());
        assert!(required_rounds(5, f64::NAN).is_err());
    }

    #[test]
    fn heuristic_is_never_above_exact_bound_complement() {
        for edges in [1usize, 2, 10, 1000] {
            for rounds in [1u64, 5, 50, 500] {
                assert!(confidence(rounds, edges) <= 1.0 - soundness_bound(rounds, edges) + 1e-12);
            }
        }
    }
}
