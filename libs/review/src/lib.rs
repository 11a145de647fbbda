//! Review authoring page
//!
//! A client-side view that resolves a movie id from navigation state, fetches
//! the movie from the catalog and, once it has arrived, presents a review
//! form inside the movie page template.

pub mod catalog;
pub mod form;
pub mod movie;
pub mod navigation;
pub mod page;
pub mod template;

pub use catalog::{CatalogConfig, CatalogError, MovieCatalog, TmdbCatalog};
pub use form::{FormError, Rating, Review, ReviewForm};
pub use movie::Movie;
pub use navigation::NavigationState;
pub use page::{PageState, ReviewPage, View};
pub use template::PageTemplate;
