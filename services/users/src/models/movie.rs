//! Movie references stored in the per-user lists

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A movie as submitted by the client
///
/// Only `id` is interpreted, and only for equality; it and every other field
/// are carried through to storage and back without transformation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRef {
    pub id: Value,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl MovieRef {
    /// Build a reference with no descriptive fields
    pub fn with_id(id: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            details: Map::new(),
        }
    }

    pub fn has_id(&self, id: &Value) -> bool {
        same_id(&self.id, id)
    }
}

/// JSON equality, except that numbers compare by value so `5` matches `5.0`
pub fn same_id(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}

/// The two per-user movie lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Favourites,
    Mustwatch,
}

impl ListKind {
    /// Column holding this list in the users table
    pub fn column(self) -> &'static str {
        match self {
            ListKind::Favourites => "favourites",
            ListKind::Mustwatch => "mustwatch",
        }
    }
}

/// Append `movie` unless an entry with the same id is already present
///
/// Returns whether the list changed.
pub fn add_unique(list: &mut Vec<MovieRef>, movie: MovieRef) -> bool {
    if list.iter().any(|m| m.has_id(&movie.id)) {
        return false;
    }
    list.push(movie);
    true
}

/// Drop every entry whose id equals `movie_id`, keeping the order of the rest
pub fn remove_by_id(list: &mut Vec<MovieRef>, movie_id: &Value) -> bool {
    let before = list.len();
    list.retain(|m| !m.has_id(movie_id));
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(list: &[MovieRef]) -> Vec<Value> {
        list.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn descriptive_fields_pass_through() {
        let raw = json!({"id": 550, "title": "Fight Club", "vote_average": 8.4});
        let movie: MovieRef = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(movie.id, json!(550));
        assert_eq!(movie.details["title"], "Fight Club");
        assert_eq!(serde_json::to_value(&movie).unwrap(), raw);
    }

    #[test]
    fn string_ids_are_kept_verbatim() {
        let raw = json!({"id": "tt0137523", "title": "Fight Club"});
        let movie: MovieRef = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(movie.id, json!("tt0137523"));
        assert_eq!(serde_json::to_value(&movie).unwrap(), raw);
    }

    #[test]
    fn missing_id_is_rejected() {
        assert!(serde_json::from_value::<MovieRef>(json!({"title": "Untitled"})).is_err());
    }

    #[test]
    fn numeric_ids_compare_by_value() {
        assert!(same_id(&json!(5), &json!(5.0)));
        assert!(!same_id(&json!(5), &json!("5")));
        assert!(same_id(&json!("tt1"), &json!("tt1")));
    }

    #[test]
    fn add_unique_skips_known_id() {
        let mut list = vec![MovieRef::with_id(5)];
        assert!(!add_unique(&mut list, MovieRef::with_id(5)));
        assert!(!add_unique(&mut list, MovieRef::with_id(5.0)));
        assert!(add_unique(&mut list, MovieRef::with_id("5")));
        assert!(add_unique(&mut list, MovieRef::with_id(7)));
        assert_eq!(ids(&list), vec![json!(5), json!("5"), json!(7)]);
    }

    #[test]
    fn remove_by_id_preserves_order() {
        let mut list = vec![
            MovieRef::with_id(1),
            MovieRef::with_id("two"),
            MovieRef::with_id(3),
        ];
        assert!(remove_by_id(&mut list, &json!("two")));
        assert!(!remove_by_id(&mut list, &json!(42)));
        assert_eq!(ids(&list), vec![json!(1), json!(3)]);
    }

    #[test]
    fn list_kind_parses_path_segment() {
        let kind: ListKind = serde_json::from_value(json!("mustwatch")).unwrap();
        assert_eq!(kind, ListKind::Mustwatch);
        assert_eq!(ListKind::Favourites.column(), "favourites");
    }
}
