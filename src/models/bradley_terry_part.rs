//! Bradley-Terry with partial pairing, the linear-cost variant of
//! Algorithm 1 from https://jmlr.csail.mit.edu/papers/volume12/weng11a/weng11a.pdf:
//! each team is compared only against its immediate rank neighbors.

use super::{ModelOptions, RatingModel, score, team_ratings, update_team_rating};
use crate::rank::ladder_pairs;
use crate::rating::Match;

/// Rank-adjacent Bradley-Terry update. Same formula as
/// [`super::BradleyTerryFull`], restricted to each team's rank neighbors.
#[derive(Clone, Copy, Debug, Default)]
pub struct BradleyTerryPart {
    pub options: ModelOptions,
}

impl BradleyTerryPart {
    pub fn new(options: ModelOptions) -> Self {
        Self { options }
    }
}

impl RatingModel for BradleyTerryPart {
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::rating::{Match, RateOptions};
    use assert_eq_float::assert_eq_float;

    #[test]
    fn test_rate() {
        let model = BradleyTerryPart::new(ModelOptions {
            mu: 10.26558503511445,
            sigma: 9.328809427064739,
            ..Default::default()
        });
        let t1 = vec![model.rating()];
        let t2 = vec![model.rating(), model.rating()];
        let m = Match::versus(t1.clone(), t2.clone());

        let default_order = model.rate(&m);
        assert_eq_float!(default_order.teams[0][0].mu, 13.529115856530728, 1e-9);
        assert_eq_float!(default_order.teams[0][0].sigma, 9.157136493268368, 1e-9);
        assert_eq_float!(default_order.teams[1][0].mu, 7.002054213698171, 1e-9);
        assert_eq_float!(default_order.teams[1][0].sigma, 9.084918843073634, 1e-9);
        assert_eq!(default_order.teams[1][0], default_order.teams[1][1]);

        let upset = model
            .rate_with(&m, &RateOptions::ranks(vec![2., 1.]))
            .unwrap();
        assert_eq_float!(upset.teams[0][0].mu, 8.468876664717218, 1e-9);
        assert_eq_float!(upset.teams[0][0].sigma, 9.157136493268368, 1e-9);
        assert_eq_float!(upset.teams[1][0].mu, 12.062293405511681, 1e-9);
        assert_eq_float!(upset.teams[1][0].sigma, 9.084918843073634, 1e-9);

        let scored = model
            .rate_with(&m, &RateOptions::scores(vec![1., 2.]))
            .unwrap();
        assert_eq!(scored, upset);

        let t3 = vec![model.rating(), model.rating(), model.rating()];
        let m = Match::new(vec![t1, t2, t3]);
        let with_draw = model
            .rate_with(&m, &RateOptions::ranks(vec![1., 2., 1.]))
            .unwrap();
        assert_eq_float!(with_draw.teams[0][0].mu, 11.335955554350374, 1e-9);
        assert_eq_float!(with_draw.teams[0][0].sigma, 9.2315523878558, 1e-9);
        assert_eq_float!(with_draw.teams[1][0].mu, 8.72473165362405, 1e-9);
        assert_eq_float!(with_draw.teams[1][0].sigma, 9.203982072532947, 1e-9);
        assert_eq_float!(with_draw.teams[2][0].mu, 10.736067897368924, 1e-9);
        assert_eq_float!(with_draw.teams[2][0].sigma, 9.002955227772386, 1e-9);
        assert_eq!(with_draw.teams[2][0], with_draw.teams[2][1]);
        assert_eq!(with_draw.teams[2][0], with_draw.teams[2][2]);
    }
}
