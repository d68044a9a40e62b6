//! Review records: product categories and the draft/finalize lifecycle
//!
//! A review is written in steps (product and rating, then body text, then a
//! conclusion). `ReviewDraft` is the mutable record while writing;
//! `ReviewDraft::finalize` appends the conclusion and yields an immutable
//! `FinalizedReview`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Separator placed between the review body and its conclusion
pub const CONCLUSION_SEPARATOR: &str = "\n\n";

/// Kind of product being reviewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    Book,
    Trip,
    Series,
    FoodDelivery,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 4] = [
        ProductCategory::Book,
        ProductCategory::Trip,
        ProductCategory::Series,
        ProductCategory::FoodDelivery,
    ];

    /// Numeric code used in stored survey data
    pub fn code(self) -> u8 {
        match self {
            ProductCategory::Book => 0,
            ProductCategory::Trip => 1,
            ProductCategory::Series => 2,
            ProductCategory::FoodDelivery => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    /// German display label ("Buch", "Reise", ...)
    pub fn label(self) -> &'static str {
        match self {
            ProductCategory::Book => "Buch",
            ProductCategory::Trip => "Reise",
            ProductCategory::Series => "Serie",
            ProductCategory::FoodDelivery => "Essenslieferung",
        }
    }

    /// Genitive phrase for prompts, e.g. "Bewertung eines Buches"
    pub fn genitive_phrase(self) -> &'static str {
        match self {
            ProductCategory::Book => "eines Buches",
            ProductCategory::Trip => "einer Reise",
            ProductCategory::Series => "einer Serie",
            ProductCategory::FoodDelivery => "der letzten Essenslieferung",
        }
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    /// Accepts English names, German labels or numeric codes
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        match value.as_str() {
            "book" | "buch" | "0" => Ok(ProductCategory::Book),
            "trip" | "reise" | "1" => Ok(ProductCategory::Trip),
            "series" | "serie" | "2" => Ok(ProductCategory::Series),
            "food-delivery" | "food" | "essen" | "essenslieferung" | "3" => {
                Ok(ProductCategory::FoodDelivery)
            }
            _ => Err(format!("unknown product category: {}", s.trim())),
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A review still being written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub category: ProductCategory,
    /// Reviewed product (book title, destination, ...)
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub rating: u8,
    /// Short headline describing the overall impression
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewDraft {
    pub fn new(category: ProductCategory) -> Self {
        Self::new_at(category, Utc::now())
    }

    /// Draft with a fixed creation time
    pub fn new_at(category: ProductCategory, created_at: DateTime<Utc>) -> Self {
        Self {
            category,
            product: String::new(),
            rating: 0,
            headline: String::new(),
            content: String::new(),
            created_at,
        }
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = headline.into();
        self
    }

    /// Replace the review body with the latest edit
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Close the draft. The conclusion is kept and also appended to the body.
    pub fn finalize(self, conclusion: impl Into<String>) -> FinalizedReview {
        let conclusion = conclusion.into();
        let content = format!("{}{}{}", self.content, CONCLUSION_SEPARATOR, conclusion);
        FinalizedReview {
            category: self.category,
            product: self.product,
            rating: self.rating,
            headline: self.headline,
            content,
            conclusion,
            created_at: self.created_at,
            finalized_at: Utc::now(),
        }
    }
}

/// A completed review; read-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedReview {
    category: ProductCategory,
    product: String,
    rating: u8,
    headline: String,
    content: String,
    conclusion: String,
    created_at: DateTime<Utc>,
    finalized_at: DateTime<Utc>,
}

impl FinalizedReview {
    pub fn category(&self) -> ProductCategory {
        self.category
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn headline(&self) -> &str {
        &self.headline
    }

    /// Body text including the appended conclusion
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn conclusion(&self) -> &str {
        &self.conclusion
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn finalized_at(&self) -> DateTime<Utc> {
        self.finalized_at
    }
}

/// A stored review in either state, as read from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewRecord {
    Finalized(FinalizedReview),
    Draft(ReviewDraft),
}

impl ReviewRecord {
    pub fn category(&self) -> ProductCategory {
        match self {
            ReviewRecord::Finalized(r) => r.category(),
            ReviewRecord::Draft(d) => d.category,
        }
    }

    pub fn product(&self) -> &str {
        match self {
            ReviewRecord::Finalized(r) => r.product(),
            ReviewRecord::Draft(d) => &d.product,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            ReviewRecord::Finalized(r) => r.content(),
            ReviewRecord::Draft(d) => &d.content,
        }
    }

    pub fn is_finalized(&self) -> bool {
        matches!(self, ReviewRecord::Finalized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn category_codes_roundtrip() {
        for category in ProductCategory::ALL {
            assert_eq!(ProductCategory::from_code(category.code()), Some(category));
        }
        assert_eq!(ProductCategory::from_code(4), None);
    }

    #[test]
    fn category_labels() {
        assert_eq!(ProductCategory::Book.label(), "Buch");
        assert_eq!(ProductCategory::FoodDelivery.label(), "Essenslieferung");
        assert_eq!(
            ProductCategory::FoodDelivery.genitive_phrase(),
            "der letzten Essenslieferung"
        );
        assert_eq!(ProductCategory::Trip.to_string(), "Reise");
    }

    #[test]
    fn category_from_str_accepts_labels_and_codes() {
        assert_eq!("Buch".parse::<ProductCategory>(), Ok(ProductCategory::Book));
        assert_eq!("series".parse::<ProductCategory>(), Ok(ProductCategory::Series));
        assert_eq!("3".parse::<ProductCategory>(), Ok(ProductCategory::FoodDelivery));
        assert!("auto".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn finalize_appends_conclusion_after_blank_line() {
        let mut draft = ReviewDraft::new_at(ProductCategory::Book, fixed_time())
            .with_product("Der Schwarm")
            .with_rating(4);
        draft.set_content("Spannend bis zur letzten Seite.");

        let review = draft.finalize("Klare Empfehlung.");
        assert_eq!(
            review.content(),
            "Spannend bis zur letzten Seite.\n\nKlare Empfehlung."
        );
        assert_eq!(review.conclusion(), "Klare Empfehlung.");
        assert_eq!(review.product(), "Der Schwarm");
        assert_eq!(review.rating(), 4);
        assert_eq!(review.created_at(), fixed_time());
        assert!(review.finalized_at() >= review.created_at());
    }

    #[test]
    fn set_content_replaces_previous_edit() {
        let mut draft = ReviewDraft::new(ProductCategory::Trip);
        draft.set_content("erste Fassung");
        draft.set_content("zweite Fassung");
        assert_eq!(draft.content, "zweite Fassung");
    }

    #[test]
    fn record_parses_draft_and_finalized() {
        let draft_json = r#"{
            "category": "trip",
            "product": "Lissabon",
            "content": "Schöne Stadt.",
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;
        let record: ReviewRecord = serde_json::from_str(draft_json).unwrap();
        assert!(!record.is_finalized());
        assert_eq!(record.category(), ProductCategory::Trip);
        assert_eq!(record.content(), "Schöne Stadt.");

        let finalized = ReviewDraft::new_at(ProductCategory::Series, fixed_time())
            .finalize("Fazit");
        let json = serde_json::to_string(&finalized).unwrap();
        let record: ReviewRecord = serde_json::from_str(&json).unwrap();
        assert!(record.is_finalized());
        assert_eq!(record.content(), "\n\nFazit");
    }
}
