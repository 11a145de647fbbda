//! Movie page template wrapping the review form

use crate::{
    form::{Rating, ReviewForm},
    movie::Movie,
};

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Snapshot of the movie page: header details plus the form inside it
#[derive(Debug, Clone, PartialEq)]
pub struct PageTemplate {
    pub movie: Movie,
    pub form: ReviewForm,
}

impl PageTemplate {
    pub fn new(movie: Movie, form: ReviewForm) -> Self {
        Self { movie, form }
    }

    /// Title followed by the tagline, when the catalog has one
    pub fn heading(&self) -> String {
        match self.movie.tagline.as_deref().filter(|t| !t.is_empty()) {
            Some(tagline) => format!("{} - {}", self.movie.title, tagline),
            None => self.movie.title.clone(),
        }
    }

    pub fn poster_url(&self) -> Option<String> {
        self.movie
            .poster_path
            .as_deref()
            .map(|path| format!("{}{}", POSTER_BASE_URL, path))
    }

    pub fn release_year(&self) -> Option<&str> {
        self.movie
            .release_date
            .as_deref()
            .and_then(|date| date.get(..4))
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.movie.genres.iter().map(|g| g.name.as_str()).collect()
    }

    /// Rating select options as `(value, label, selected)`, best first
    pub fn rating_options(&self) -> Vec<(u8, &'static str, bool)> {
        Rating::ALL
            .into_iter()
            .map(|r| (u8::from(r), r.label(), r == self.form.rating))
            .collect()
    }
}
