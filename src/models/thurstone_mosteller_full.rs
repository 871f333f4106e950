//! Thurstone-Mosteller with full pairing from
//! https://jmlr.csail.mit.edu/papers/volume12/weng11a/weng11a.pdf: the
//! probit counterpart of Bradley-Terry, with ties handled through the
//! doubly-truncated corrections Ṽ and W̃.

use super::{ModelOptions, RatingModel, team_ratings, update_team_rating};
use crate::numerical::{v, vt, w, wt};
use crate::rating::Match;

/// All-pairs Thurstone-Mosteller update.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThurstoneMostellerFull {
    pub options: ModelOptions,
}

impl ThurstoneMostellerFull {
    pub fn new(options: ModelOptions) -> Self {
        Self { options }
    }
}

impl RatingModel for ThurstoneMostellerFull {
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::rating::{Match, RateOptions};
    use assert_eq_float::assert_eq_float;

    #[test]
    fn test_rate() {
        let model = ThurstoneMostellerFull::new(ModelOptions {
            mu: 22.919853696612385,
            sigma: 7.315441649030257,
            ..Default::default()
        });
        let t1 = vec![model.rating()];
        let t2 = vec![model.rating(), model.rating()];
        let m = Match::versus(t1.clone(), t2.clone());

        let default_order = model.rate(&m);
        assert_eq_float!(default_order.teams[0][0].mu, 30.80436898362278, 1e-9);
        assert_eq_float!(default_order.teams[0][0].sigma, 6.848823647647466, 1e-9);
        assert_eq_float!(default_order.teams[1][0].mu, 15.03533840960199, 1e-9);
        assert_eq_float!(default_order.teams[1][0].sigma, 6.645738987776486, 1e-9);
        assert_eq!(default_order.teams[1][0], default_order.teams[1][1]);

        let upset = model
            .rate_with(&m, &RateOptions::ranks(vec![2., 1.]))
            .unwrap();
        assert_eq_float!(upset.teams[0][0].mu, 22.50057782249884, 1e-9);
        assert_eq_float!(upset.teams[0][0].sigma, 7.214694670332423, 1e-9);
        assert_eq_float!(upset.teams[1][0].mu, 23.33912957072593, 1e-9);
        assert_eq_float!(upset.teams[1][0].sigma, 7.172348917871497, 1e-9);

        let scored = model
            .rate_with(&m, &RateOptions::scores(vec![1., 2.]))
            .unwrap();
        assert_eq!(scored, upset);

        let t3 = vec![model.rating(), model.rating(), model.rating()];
        let m = Match::new(vec![t1, t2, t3]);
        let with_draw = model
            .rate_with(&m, &RateOptions::ranks(vec![1., 2., 1.]))
            .unwrap();
        assert_eq_float!(with_draw.teams[0][0].mu, 40.6650444553867, 1e-9);
        assert_eq_float!(with_draw.teams[0][0].sigma, 6.447206062682213, 1e-9);
        assert_eq_float!(with_draw.teams[1][0].mu, 14.466950192459162, 1e-9);
        assert_eq_float!(with_draw.teams[1][0].sigma, 6.526969667932674, 1e-9);
        assert_eq_float!(with_draw.teams[2][0].mu, 13.627566441991291, 1e-9);
        assert_eq_float!(with_draw.teams[2][0].sigma, 6.508263154659147, 1e-9);
        assert_eq!(with_draw.teams[2][0], with_draw.teams[2][1]);
        assert_eq!(with_draw.teams[2][0], with_draw.teams[2][2]);
    }
}
