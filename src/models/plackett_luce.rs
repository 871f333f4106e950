//! The generalized Plackett-Luce model, Algorithm 4 (PL) from
//! https://jmlr.csail.mit.edu/papers/volume12/weng11a/weng11a.pdf

use super::{ModelOptions, RatingModel, c, sum_q, team_ratings, tie_counts, update_team_rating};
use crate::rating::Match;

/// Full-choice Plackett-Luce update: each team is weighed against the
/// partition sums over every team that placed at least as well as it.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlackettLuce {
    pub options: ModelOptions,
}

impl PlackettLuce {
    pub fn new(options: ModelOptions) -> Self {
        Self { options }
    }
}

impl RatingModel for PlackettLuce {
    fn options(&self) -> &ModelOptions {
        &self.options
    }

    fn compute(&self, m: &Match, ranks: &[f64]) -> Match {
        let ratings = team_ratings(m, Some(ranks));
        let c = c(&ratings);
        let sum_q = sum_q(&ratings, c);
        let tie_counts = tie_counts(&ratings);
        let mut teams = Vec::with_capacity(ratings.len());
        for (i, team_i) in ratings.iter().enumerate() {
            let mut omega = 0.;
            let mut delta = 0.;
            let exp_i = (team_i.mu / c).exp();
            for (q, team_q) in ratings.iter().enumerate() {
                if team_q.rank > team_i.rank {
                    continue;
                }
                let p = exp_i / sum_q[q];
                let ties = tie_counts[q] as f64;
                delta += p * (1. - p) / ties;
                if q == i {
                    omega += (1. - p) / ties;
                } else {
                    omega -= p / ties;
                }
            }
            omega *= team_i.sigma_sq / c;
            delta *= team_i.sigma_sq / (c * c);
            delta *= (self.options.gamma)(
                c,
                ratings.len(),
                team_i.mu,
                team_i.sigma_sq,
                &team_i.team,
                team_i.rank,
            );
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
        let model = PlackettLuce::new(ModelOptions {
            mu: 31.321989232514305,
            sigma: 11.379964801443018,
            ..Default::default()
        });
        let t1 = vec![model.rating()];
        let t2 = vec![model.rating(), model.rating()];
        let m = Match::versus(t1.clone(), t2.clone());

        let default_order = model.rate(&m);
        assert_eq_float!(default_order.teams[0][0].mu, 36.48967347401391, 1e-9);
        assert_eq_float!(default_order.teams[0][0].sigma, 11.237778601372977, 1e-9);
        assert_eq_float!(default_order.teams[1][0].mu, 26.154304991014694, 1e-9);
        assert_eq_float!(default_order.teams[1][0].sigma, 11.17822477763209, 1e-9);
        assert_eq!(default_order.teams[1][0], default_order.teams[1][1]);

        let upset = model
            .rate_with(&m, &RateOptions::ranks(vec![2., 1.]))
            .unwrap();
        assert_eq_float!(upset.teams[0][0].mu, 30.19454401757094, 1e-9);
        assert_eq_float!(upset.teams[0][0].sigma, 11.237778601372977, 1e-9);
        assert_eq_float!(upset.teams[1][0].mu, 32.44943444745767, 1e-9);
        assert_eq_float!(upset.teams[1][0].sigma, 11.17822477763209, 1e-9);

        // Scores flip the direction and must agree with the ranked form.
        let scored = model
            .rate_with(&m, &RateOptions::scores(vec![1., 2.]))
            .unwrap();
        assert_eq!(scored, upset);

        let t3 = vec![model.rating(), model.rating(), model.rating()];
        let m = Match::new(vec![t1, t2, t3]);
        let with_draw = model
            .rate_with(&m, &RateOptions::ranks(vec![1., 2., 1.]))
            .unwrap();
        assert_eq_float!(with_draw.teams[0][0].mu, 33.21874815457553, 1e-9);
        assert_eq_float!(with_draw.teams[0][0].sigma, 11.354896725884002, 1e-9);
        assert_eq_float!(with_draw.teams[1][0].mu, 30.27713112192334, 1e-9);
        assert_eq_float!(with_draw.teams[1][0].sigma, 11.291328826858104, 1e-9);
        assert_eq_float!(with_draw.teams[2][0].mu, 30.470088421044046, 1e-9);
        assert_eq_float!(with_draw.teams[2][0].sigma, 11.249240904583088, 1e-9);
        assert_eq!(with_draw.teams[2][0], with_draw.teams[2][1]);
        assert_eq!(with_draw.teams[2][0], with_draw.teams[2][2]);
    }
}
