//! Skill estimation for team competitions, after the Bayesian approximation
//! framework of Weng and Lin: https://jmlr.csail.mit.edu/papers/volume12/weng11a/weng11a.pdf
//!
//! A [`Match`] is an ordered list of teams, each an ordered list of
//! [`Rating`]s. Pick one of the five models, then call
//! [`RatingModel::rate`] (or [`RatingModel::rate_with`] for explicit ranks
//! or scores) to get back a match with updated ratings; the input is never
//! mutated. The `predict_*` methods give win, draw, and rank probabilities
//! without updating anything.

pub mod models;
pub mod numerical;
pub mod rank;
pub mod rating;

pub use models::{
    BradleyTerryFull, BradleyTerryPart, Gamma, ModelOptions, PlackettLuce, RatingError,
    RatingModel, ThurstoneMostellerFull, ThurstoneMostellerPart, get_model_by_name,
};
pub use rating::{Match, RateOptions, Rating, Team, TeamRating};
