/// The arithmetic the decoder accumulates path scores in.
pub trait ProbabilitySpace {
    /// The score of an impossible path. Best-score searches start from this value.
    const ZERO: f64;

    /// Maps a model probability into this space.
    fn lift(probability: f64) -> f64;

    /// Extends a path score by one factor.
    fn combine(score: f64, factor: f64) -> f64;
}

/// Plain probabilities, multiplied directly.
///
/// Long observations or many states can underflow to zero, after which every
/// candidate ties and the tie break decides the path.
#[derive(Debug, Clone, Copy)]
pub struct Linear;

/// Natural-log probabilities, added.
#[derive(Debug, Clone, Copy)]
pub struct LogSpace;

impl ProbabilitySpace for Linear {
    const ZERO: f64 = 0.0;

    #[inline]
    fn lift(probability: f64) -> f64 {
        probability
    }

    #[inline]
    fn combine(score: f64, factor: f64) -> f64 {
        score * factor
    }
}

impl ProbabilitySpace for LogSpace {
    const ZERO: f64 = f64::NEG_INFINITY;

    #[inline]
    fn lift(probability: f64) -> f64 {
        probability.ln()
    }

    #[inline]
    fn combine(score: f64, factor: f64) -> f64 {
        score + factor
    }
}

/// Returns the index and value of the best score.
///
/// Scores are compared with `>=` starting from [`ProbabilitySpace::ZERO`], so among equal
/// maxima the one with the highest index is chosen. If no score reaches `ZERO`,
/// index 0 is returned together with `ZERO`.
pub fn select_best<Space: ProbabilitySpace>(scores: impl IntoIterator<Item = f64>) -> (usize, f64) {
    let mut best_index = 0;
    let mut best = Space::ZERO;
    for (index, score) in scores.into_iter().enumerate() {
        if score >= best {
            best = score;
            best_index = index;
        }
    }
    (best_index, best)
}
