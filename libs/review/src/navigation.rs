//! State carried along with a client-side navigation
//!
//! The review page reads the movie id from here rather than from the URL.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub movie_id: Option<i64>,
}

impl NavigationState {
    pub fn for_movie(movie_id: i64) -> Self {
        Self {
            movie_id: Some(movie_id),
        }
    }
}
