//! Review form shown once the movie is available

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum length of the review text
pub const MIN_REVIEW_LENGTH: usize = 10;

/// Rating choices offered by the form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rating {
    Terrible = 1,
    Poor = 2,
    #[default]
    Average = 3,
    Good = 4,
    Excellent = 5,
}

impl Rating {
    /// Options in display order
    pub const ALL: [Rating; 5] = [
        Rating::Excellent,
        Rating::Good,
        Rating::Average,
        Rating::Poor,
        Rating::Terrible,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rating::Terrible => "Terrible",
            Rating::Poor => "Poor",
            Rating::Average => "Average",
            Rating::Good => "Good",
            Rating::Excellent => "Excellent",
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating as u8
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::ALL
            .into_iter()
            .find(|r| *r as u8 == value)
            .ok_or_else(|| format!("rating must be between 1 and 5, got {}", value))
    }
}

/// Field-level validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Name is required")]
    MissingAuthor,

    #[error("Review cannot be empty.")]
    EmptyReview,

    #[error("Review is too short")]
    ReviewTooShort,
}

/// A submitted review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub movie_id: i64,
    pub author: String,
    pub review: String,
    pub rating: Rating,
}

/// Editable form state bound to one movie
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewForm {
    movie_id: i64,
    pub author: String,
    pub review: String,
    pub rating: Rating,
}

impl ReviewForm {
    pub fn new(movie_id: i64) -> Self {
        Self {
            movie_id,
            author: String::new(),
            review: String::new(),
            rating: Rating::default(),
        }
    }

    pub fn movie_id(&self) -> i64 {
        self.movie_id
    }

    /// Every failing field, in form order
    pub fn validate(&self) -> Vec<FormError> {
        let mut errors = Vec::new();

        if self.author.trim().is_empty() {
            errors.push(FormError::MissingAuthor);
        }

        let review = self.review.trim();
        if review.is_empty() {
            errors.push(FormError::EmptyReview);
        } else if review.chars().count() < MIN_REVIEW_LENGTH {
            errors.push(FormError::ReviewTooShort);
        }

        errors
    }

    /// Produce the review, or every validation failure
    pub fn submit(&self) -> Result<Review, Vec<FormError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Review {
            movie_id: self.movie_id,
            author: self.author.trim().to_string(),
            review: self.review.trim().to_string(),
            rating: self.rating,
        })
    }

    /// Clear the inputs after a successful submission
    pub fn reset(&mut self) {
        self.author.clear();
        self.review.clear();
        self.rating = Rating::default();
    }
}
