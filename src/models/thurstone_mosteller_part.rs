//! Thurstone-Mosteller with partial pairing: the linear-cost variant of the
//! probit model, comparing each team only against its rank neighbors with a
//! doubled comparison scale to make up for the smaller comparison set.

use super::{ModelOptions, RatingModel, team_ratings, update_team_rating};
use crate::numerical::{v, vt, w, wt};
use crate::rank::ladder_pairs;
use crate::rating::Match;

/// Rank-adjacent Thurstone-Mosteller update.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThurstoneMostellerPart {
    pub options: ModelOptions,
}

impl ThurstoneMostellerPart {
    pub fn new(options: ModelOptions) -> Self {
        Self { options }
    }
}

impl RatingModel for ThurstoneMostellerPart {
    fn options(&self) -> &ModelOptions {
        &self.options
    }

    fn compute(&self, m: &Match, ranks: &[f64]) -> Match {
        let ratings = team_ratings(m, Some(ranks));
        let beta_sq = self.options.beta * self.options.beta;
        let adjacents = ladder_pairs(&ratings);
        let mut teams = Vec::with_capacity(ratings.len());
        for (team_i, neighbors) in ratings.iter().zip(&adjacents) {
            let mut omega = 0.;
            let mut delta = 0.;
            for team_q in neighbors {
                let c_iq = 2. * (team_i.sigma_sq + team_q.sigma_sq + 2. * beta_sq).sqrt();
                let delta_mu = (team_i.mu - team_q.mu) / c_iq;
                let sigma_sq_to_c_iq = team_i.sigma_sq / c_iq;
                let margin = self.options.kappa / c_iq;
                let gamma = (self.options.gamma)(
                    c_iq,
                    ratings.len(),
                    team_i.mu,
                    team_i.sigma_sq,
                    &team_i.team,
                    team_i.rank,
                );
                if team_q.rank > team_i.rank {
                    omega += sigma_sq_to_c_iq * v(delta_mu, margin);
                    delta += gamma * sigma_sq_to_c_iq / c_iq * w(delta_mu, margin);
                } else if team_q.rank < team_i.rank {
                    omega -= sigma_sq_to_c_iq * v(-delta_mu, margin);
                    delta += gamma * sigma_sq_to_c_iq / c_iq * w(-delta_mu, margin);
                } else {
                    omega += sigma_sq_to_c_iq * vt(delta_mu, margin);
                    delta += gamma * sigma_sq_to_c_iq / c_iq * wt(delta_mu, margin);
                }
            }
            teams.push(update_team_rating(&self.options, team_i, omega, delta));
        }
        Match::new(teams)
    }
}
