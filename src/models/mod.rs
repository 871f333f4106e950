//! The rating models and their shared orchestration.
//!
//! Each model implements one closed-form Bayesian update over a rank-sorted
//! match ([`RatingModel::compute`]). Everything around it is identical across
//! models and lives in the provided methods of [`RatingModel`]: dynamics
//! inflation, rank normalization, ordering, restoration, and the prediction
//! queries.

mod bradley_terry_full;
mod bradley_terry_part;
mod plackett_luce;
mod thurstone_mosteller_full;
mod thurstone_mosteller_part;

pub use bradley_terry_full::BradleyTerryFull;
pub use bradley_terry_part::BradleyTerryPart;
pub use plackett_luce::PlackettLuce;
pub use thurstone_mosteller_full::ThurstoneMostellerFull;
pub use thurstone_mosteller_part::ThurstoneMostellerPart;

use crate::numerical::{phi_major, phi_major_inverse};
use crate::rank::{placements, unwind};
use crate::rating::{self, Match, RateOptions, Rating, Team, TeamRating};
use itertools::iproduct;

/// Controls how aggressively a team's variance shrinks, as a function of the
/// comparison scale `c`, the team count, the team's aggregate mean and
/// variance, its members, and its rank.
pub type Gamma =
    fn(c: f64, team_count: usize, mu: f64, sigma_sq: f64, team: &[Rating], rank: f64) -> f64;

fn default_gamma(
    c: f64,
    _team_count: usize,
    _mu: f64,
    sigma_sq: f64,
    _team: &[Rating],
    _rank: f64,
) -> f64 {
    sigma_sq.sqrt() / c
}

/// Shared configuration for every model. Build one with struct-update
/// syntax over [`ModelOptions::default`]; a constructed model never changes
/// its options, so one instance is safe to share between threads.
#[derive(Clone, Copy, Debug)]
pub struct ModelOptions {
    /// Default mean for ratings created by the model.
    pub mu: f64,
    /// Default deviation for ratings created by the model.
    pub sigma: f64,
    /// Performance uncertainty.
    pub beta: f64,
    /// Floor on the variance-shrink factor.
    pub kappa: f64,
    /// Variance-shrink control function.
    pub gamma: Gamma,
    /// Per-match deviation growth.
    pub tau: f64,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            mu: rating::MU,
            sigma: rating::SIGMA,
            beta: rating::BETA,
            kappa: rating::KAPPA,
            gamma: default_gamma,
            tau: rating::TAU,
        }
    }
}

/// Errors surfaced by the fallible rating operations.
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("expected one rank per team ({teams}), got {ranks}")]
    RankCountMismatch { teams: usize, ranks: usize },
    #[error("rank values must not be NaN")]
    NanRank,
    #[error(
        "{0} is not a valid rating model. Must be one of: plackett-luce, bradley-terry-full, \
         bradley-terry-part, thurstone-mosteller-full, thurstone-mosteller-part"
    )]
    UnknownModel(String),
}

/// A rating model: one model-specific update rule plus the shared
/// orchestration and prediction queries.
pub trait RatingModel: std::fmt::Debug {
    /// The model's configuration.
    fn options(&self) -> &ModelOptions;

    /// Apply the model's update rule to a match whose teams are already
    /// sorted by `ranks` (ascending, lower is better). Returns the updated
    /// teams in the same order.
    fn compute(&self, m: &Match, ranks: &[f64]) -> Match;

    /// A fresh rating with this model's default mean and deviation.
    fn rating(&self) -> Rating {
        Rating::new(self.options().mu, self.options().sigma)
    }

    /// Rate with the identity ranking: team order is finish order.
    fn rate(&self, m: &Match) -> Match {
        let ranks = default_ranks(m.team_count());
        self.rate_with(m, &RateOptions::ranks(ranks))
            .expect("identity ranking is always valid")
    }

    /// Rate with explicit ranks or scores. The input match is left
    /// untouched; the result is a fresh match in the original team order.
    fn rate_with(&self, m: &Match, options: &RateOptions) -> Result<Match, RatingError> {
        if options.ranks.len() != m.team_count() {
            return Err(RatingError::RankCountMismatch {
                teams: m.team_count(),
                ranks: options.ranks.len(),
            });
        }
        if options.ranks.iter().any(|rank| rank.is_nan()) {
            return Err(RatingError::NanRank);
        }
        if m.teams.iter().flatten().any(|rating| rating.sigma <= 0.) {
            tracing::warn!("input rating has a non-positive deviation; the update is unreliable");
        }
        let tau_sq = self.options().tau * self.options().tau;
        let mut teams = m.teams.clone();
        for rating in teams.iter_mut().flatten() {
            rating.sigma = (rating.sigma * rating.sigma + tau_sq).sqrt();
        }
        // Internally lower is always better; scores flip sign.
        let mut keys = options.ranks.clone();
        if !options.lower_is_better {
            for key in &mut keys {
                *key = -*key;
            }
        }
        let (sorted_teams, tenet) = unwind(teams, &keys);
        keys.sort_by(f64::total_cmp);
        let computed = self.compute(&Match::new(sorted_teams), &keys);
        let (restored, _) = unwind(computed.teams, &tenet);
        Ok(Match::new(restored))
    }

    /// Win probability per team, in team order. Sums to one.
    fn predict_win(&self, m: &Match) -> Vec<f64> {
        let options = self.options();
        let team_count = m.team_count();
        let beta_sq = options.beta * options.beta;
        if team_count == 2 {
            let ratings = team_ratings(m, None);
            let p = phi_major(
                (ratings[0].mu - ratings[1].mu)
                    / (m.player_count() as f64 * beta_sq + ratings[0].sigma_sq
                        + ratings[1].sigma_sq)
                        .sqrt(),
            );
            return vec![p, 1. - p];
        }
        let pair_probabilities = ordered_pairs(m, |team_i, team_q| {
            phi_major(
                (team_i.mu - team_q.mu)
                    / (team_count as f64 * beta_sq + team_i.sigma_sq + team_q.sigma_sq).sqrt(),
            )
        });
        per_team_shares(&pair_probabilities, team_count)
    }

    /// Probability that the whole match ends in a draw.
    fn predict_draw(&self, m: &Match) -> f64 {
        let options = self.options();
        let team_count = m.team_count() as f64;
        let beta_sq = options.beta * options.beta;
        let draw_margin = draw_margin(options, m.player_count());
        let pair_sum: f64 = ordered_pairs(m, |team_i, team_q| {
            let scale = (team_count * beta_sq + team_i.sigma_sq + team_q.sigma_sq).sqrt();
            phi_major((draw_margin - team_i.mu + team_q.mu) / scale)
                - phi_major((team_i.mu - team_q.mu - draw_margin) / scale)
        })
        .iter()
        .sum();
        let denom = if team_count > 2. {
            team_count * (team_count - 1.)
        } else {
            1.
        };
        pair_sum.abs() / denom
    }

    /// Most probable rank per team, with its probability, in team order.
    /// The probabilities plus [`RatingModel::predict_draw`] sum to one.
    fn predict_rank(&self, m: &Match) -> Vec<(usize, f64)> {
        let options = self.options();
        let team_count = m.team_count();
        let beta_sq = options.beta * options.beta;
        let draw_margin = draw_margin(options, m.player_count());
        let pair_probabilities = ordered_pairs(m, |team_i, team_q| {
            phi_major(
                (team_i.mu - team_q.mu - draw_margin)
                    / (team_count as f64 * beta_sq + team_i.sigma_sq + team_q.sigma_sq).sqrt(),
            )
        });
        let rank_probabilities: Vec<f64> = per_team_shares(&pair_probabilities, team_count)
            .iter()
            .map(|probability| probability.abs())
            .collect();
        placements(&rank_probabilities)
            .into_iter()
            .zip(rank_probabilities)
            .map(|(placement, probability)| (placement as usize, probability))
            .collect()
    }
}

/// Look up a model by name, with default options.
pub fn get_model_by_name(model_name: &str) -> Result<Box<dyn RatingModel>, RatingError> {
    match model_name {
        "plackett-luce" => Ok(Box::new(PlackettLuce::default())),
        "bradley-terry-full" => Ok(Box::new(BradleyTerryFull::default())),
        "bradley-terry-part" => Ok(Box::new(BradleyTerryPart::default())),
        "thurstone-mosteller-full" => Ok(Box::new(ThurstoneMostellerFull::default())),
        "thurstone-mosteller-part" => Ok(Box::new(ThurstoneMostellerPart::default())),
        name => Err(RatingError::UnknownModel(name.to_string())),
    }
}

fn default_ranks(count: usize) -> Vec<f64> {
    (1..=count).map(|rank| rank as f64).collect()
}

fn draw_margin(options: &ModelOptions, player_count: usize) -> f64 {
    let player_count = player_count as f64;
    player_count.sqrt() * options.beta * phi_major_inverse((1. + 1. / player_count) / 2.)
}

/// Aggregate one team: summed means, summed variances.
pub(crate) fn team_rating(team: &[Rating], rank: f64) -> TeamRating {
    TeamRating {
        mu: team.iter().map(|rating| rating.mu).sum(),
        sigma_sq: team.iter().map(|rating| rating.sigma * rating.sigma).sum(),
        team: team.to_vec(),
        rank,
    }
}

/// Aggregate every team and attach the tie-normalized placement of its rank
/// (identity ranking when `ranks` is absent).
pub(crate) fn team_ratings(m: &Match, ranks: Option<&[f64]>) -> Vec<TeamRating> {
    let placed = match ranks {
        Some(ranks) => placements(ranks),
        None => placements(&default_ranks(m.team_count())),
    };
    m.teams
        .iter()
        .zip(placed)
        .map(|(team, rank)| team_rating(team, rank))
        .collect()
}

/// The shared comparison scale: sqrt of total team variance plus one
/// default beta² per team. The default is used even under a custom model
/// beta, matching the reference update exactly.
pub(crate) fn c(team_ratings: &[TeamRating]) -> f64 {
    team_ratings
        .iter()
        .map(|team| team.sigma_sq + rating::BETA_SQ)
        .sum::<f64>()
        .sqrt()
}

/// Plackett-Luce partition terms: for each team, the sum of exp(mu/c) over
/// every team that placed no better than it.
pub(crate) fn sum_q(team_ratings: &[TeamRating], c: f64) -> Vec<f64> {
    team_ratings
        .iter()
        .map(|team_q| {
            team_ratings
                .iter()
                .filter(|team_i| team_i.rank >= team_q.rank)
                .map(|team_i| (team_i.mu / c).exp())
                .sum()
        })
        .collect()
}

/// How many teams share each team's rank.
pub(crate) fn tie_counts(team_ratings: &[TeamRating]) -> Vec<usize> {
    team_ratings
        .iter()
        .map(|team_i| {
            team_ratings
                .iter()
                .filter(|team_q| team_q.rank == team_i.rank)
                .count()
        })
        .collect()
}

/// Outcome score of team i against team q: win 1, tie one half, loss 0.
pub(crate) fn score(q_rank: f64, i_rank: f64) -> f64 {
    match q_rank.partial_cmp(&i_rank) {
        Some(std::cmp::Ordering::Greater) => 1.,
        Some(std::cmp::Ordering::Equal) => 0.5,
        _ => 0.,
    }
}

/// Distribute a team's accumulated omega (mean shift) and delta (variance
/// shrink) over its members, each weighted by its share of the team
/// variance. `kappa` floors the shrink factor so deviations stay positive.
pub(crate) fn update_team_rating(
    options: &ModelOptions,
    team: &TeamRating,
    omega: f64,
    delta: f64,
) -> Team {
    team.team
        .iter()
        .map(|rating| {
            let sigma_sq = rating.sigma * rating.sigma;
            Rating::new(
                rating.mu + sigma_sq / team.sigma_sq * omega,
                rating.sigma * (1. - sigma_sq / team.sigma_sq * delta).max(options.kappa).sqrt(),
            )
        })
        .collect()
}

/// Evaluate `f` over every ordered pair of distinct teams, row-major.
fn ordered_pairs(m: &Match, f: impl Fn(&TeamRating, &TeamRating) -> f64) -> Vec<f64> {
    let aggregates: Vec<TeamRating> = m.teams.iter().map(|team| team_rating(team, 0.)).collect();
    iproduct!(0..aggregates.len(), 0..aggregates.len())
        .filter(|(i, q)| i != q)
        .map(|(i, q)| f(&aggregates[i], &aggregates[q]))
        .collect()
}

/// Collapse row-major ordered-pair values into one share per team, dividing
/// each team's row sum by the number of unordered pairs.
fn per_team_shares(pair_values: &[f64], team_count: usize) -> Vec<f64> {
    let denom = (team_count * team_count.saturating_sub(1)) as f64 / 2.;
    (0..team_count)
        .map(|i| {
            let row = &pair_values[i * (team_count - 1)..(i + 1) * (team_count - 1)];
            row.iter().sum::<f64>() / denom
        })
        .collect()
}
