//! The rating data model: a skill belief is a normal distribution over a
//! player's strength, a team is an ordered group of those, and a match is an
//! ordered list of teams.

use serde::{Deserialize, Serialize};

/// Deviations subtracted from the mean by `ordinal`, and the divisor between
/// the default mean and deviation.
pub const Z: f64 = 3.;
/// Default mean of a fresh rating.
pub const MU: f64 = 25.;
/// Default deviation of a fresh rating.
pub const SIGMA: f64 = MU / Z;
/// Default performance uncertainty: variance added by in-match noise.
pub const BETA: f64 = SIGMA / 2.;
pub(crate) const BETA_SQ: f64 = BETA * BETA;
/// Default per-match deviation growth, modelling skill drift between matches.
pub const TAU: f64 = MU / 300.;
/// Default floor on the variance-shrink factor, keeping posteriors positive.
pub const KAPPA: f64 = 1e-4;

/// A skill belief: mean and standard deviation of a normal distribution.
/// Two ratings are equal only when both fields are bit-for-bit equal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub sigma: f64,
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            mu: MU,
            sigma: SIGMA,
        }
    }
}

impl Rating {
    pub fn new(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    /// A rating with a known mean and the default deviation.
    pub fn with_mu(mu: f64) -> Self {
        Self { mu, sigma: SIGMA }
    }

    /// Conservative single-number skill estimate: the mean shrunk by
    /// [`Z`] deviations. Useful for leaderboards.
    pub fn ordinal(&self) -> f64 {
        self.mu - Z * self.sigma
    }
}

/// An ordered group of ratings competing as one unit.
pub type Team = Vec<Rating>;

/// Aggregate view of one team inside a single rate or predict call: summed
/// means, summed variances, the member ratings, and the team's normalized
/// placement. Never outlives the call that built it.
#[derive(Clone, Debug)]
pub struct TeamRating {
    pub mu: f64,
    pub sigma_sq: f64,
    pub team: Team,
    pub rank: f64,
}

/// An ordered list of teams. The order only carries meaning together with
/// the rank list handed to `rate_with`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub teams: Vec<Team>,
}

impl Match {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// A head-to-head match between two solo ratings.
    pub fn duel(a: Rating, b: Rating) -> Self {
        Self {
            teams: vec![vec![a], vec![b]],
        }
    }

    /// A match between exactly two teams.
    pub fn versus(team_a: Team, team_b: Team) -> Self {
        Self {
            teams: vec![team_a, team_b],
        }
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn player_count(&self) -> usize {
        self.teams.iter().map(Vec::len).sum()
    }
}

/// The outcome of a match: one value per team, equal values meaning a tie.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateOptions {
    pub ranks: Vec<f64>,
    /// When false, ranks are score-like: larger means better.
    pub lower_is_better: bool,
}

impl RateOptions {
    /// Outcome as placements: lower is better.
    pub fn ranks(ranks: Vec<f64>) -> Self {
        Self {
            ranks,
            lower_is_better: true,
        }
    }

    /// Outcome as scores: higher is better.
    pub fn scores(scores: Vec<f64>) -> Self {
        Self {
            ranks: scores,
            lower_is_better: false,
        }
    }
}
