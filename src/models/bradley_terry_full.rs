//! Bradley-Terry with full pairing, Algorithm 1 (BT-full) from
//! https://jmlr.csail.mit.edu/papers/volume12/weng11a/weng11a.pdf

use super::{ModelOptions, RatingModel, score, team_ratings, update_team_rating};
use crate::rating::Match;

/// All-pairs Bradley-Terry update: every team is compared against every
/// other team under the logistic win model.
#[derive(Clone, Copy, Debug, Default)]
pub struct BradleyTerryFull {
    pub options: ModelOptions,
}

impl BradleyTerryFull {
    pub fn new(options: ModelOptions) -> Self {
        Self { options }
    }
}

impl RatingModel for BradleyTerryFull {
    fn options(&self) -> &ModelOptions {
        &self.options
    }

    fn compute(&self, m: &Match, ranks: &[f64]) -> Match {
        let ratings = team_ratings(m, Some(ranks));
        let beta_sq = self.options.beta * self.options.beta;
        let mut teams = Vec::with_capacity(ratings.len());
        for (i, team_i) in ratings.iter().enumerate() {
            let mut omega = 0.;
            let mut delta = 0.;
            for (q, team_q) in ratings.iter().enumerate() {
                if q == i {
                    continue;
                }
                let c_iq = (team_i.sigma_sq + team_q.sigma_sq + 2. * beta_sq).sqrt();
                let p_iq = 1. / (1. + ((team_q.mu - team_i.mu) / c_iq).exp());
                let sigma_sq_to_c_iq = team_i.sigma_sq / c_iq;
                let gamma = (self.options.gamma)(
                    c_iq,
                    ratings.len(),
                    team_i.mu,
                    team_i.sigma_sq,
                    &team_i.team,
                    team_i.rank,
                );
                omega += sigma_sq_to_c_iq * (score(team_q.rank, team_i.rank) - p_iq);
                delta += gamma * sigma_sq_to_c_iq / c_iq * p_iq * (1. - p_iq);
            }
            teams.push(update_team_rating(&self.options, team_i, omega, delta));
        }
        Match::new(teams)
    }
}
