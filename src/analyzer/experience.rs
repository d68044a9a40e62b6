//! Experience score of a reviewer
//!
//! The score is the plain sum of the self-reported counters, book reviews
//! excepted (they are recorded but not scored). There is no
//! weighting or normalization yet; the formula is a placeholder until product
//! guidance on weighting exists.

use serde::{Deserialize, Serialize};

/// Sum of all inputs, missing values counting as 0. Saturates instead of overflowing.
pub fn aggregate<I>(inputs: I) -> i64
where
    I: IntoIterator<Item = Option<i64>>,
{
    inputs
        .into_iter()
        .fold(0i64, |acc, value| acc.saturating_add(value.unwrap_or(0)))
}

/// Self-reported background of a survey participant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceProfile {
    /// How often the participant ordered online
    #[serde(default)]
    pub online_orders: Option<i64>,
    /// How often the participant read reviews before buying
    #[serde(default)]
    pub reviews_read: Option<i64>,
    /// How many product reviews the participant wrote in total
    #[serde(default)]
    pub product_reviews: Option<i64>,
    #[serde(default)]
    pub book_reviews: Option<i64>,
    #[serde(default)]
    pub trip_reviews: Option<i64>,
    #[serde(default)]
    pub series_reviews: Option<i64>,
    #[serde(default)]
    pub food_reviews: Option<i64>,
    /// Self-rated expertise as a reviewer
    #[serde(default)]
    pub self_rated_expertise: Option<i64>,
}

impl ExperienceProfile {
    /// All counters in a fixed order
    pub fn counters(&self) -> [Option<i64>; 8] {
        [
            self.online_orders,
            self.reviews_read,
            self.product_reviews,
            self.book_reviews,
            self.trip_reviews,
            self.series_reviews,
            self.food_reviews,
            self.self_rated_expertise,
        ]
    }

    /// Counters that make up the experience score. `book_reviews` is recorded
    /// but not part of the sum.
    pub fn scored_counters(&self) -> [Option<i64>; 7] {
        [
            self.online_orders,
            self.product_reviews,
            self.trip_reviews,
            self.food_reviews,
            self.series_reviews,
            self.reviews_read,
            self.self_rated_expertise,
        ]
    }

    pub fn score(&self) -> i64 {
        aggregate(self.scored_counters())
    }

    /// Counters set here win; unset ones are taken from `base`
    pub fn or(self, base: ExperienceProfile) -> ExperienceProfile {
        ExperienceProfile {
            online_orders: self.online_orders.or(base.online_orders),
            reviews_read: self.reviews_read.or(base.reviews_read),
            product_reviews: self.product_reviews.or(base.product_reviews),
            book_reviews: self.book_reviews.or(base.book_reviews),
            trip_reviews: self.trip_reviews.or(base.trip_reviews),
            series_reviews: self.series_reviews.or(base.series_reviews),
            food_reviews: self.food_reviews.or(base.food_reviews),
            self_rated_expertise: self.self_rated_expertise.or(base.self_rated_expertise),
        }
    }
}
