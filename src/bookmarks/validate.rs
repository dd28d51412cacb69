use serde::Deserialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::model::{MAX_RATING, MIN_RATING, NewBookmark};

/// Create body as received. JSON `null` and absent keys both land as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarkCandidate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<Value>,
}

/// Ratings arrive as a JSON number or a numeric string.
fn parse_rating(value: &Value) -> Option<i64> {
    let rating = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (MIN_RATING..=MAX_RATING).contains(&rating).then_some(rating)
}

/// Checks title, url, description, rating in that order and reports the first
/// missing one only.
pub fn validate_create(candidate: BookmarkCandidate) -> Result<NewBookmark, ValidationError> {
    use ValidationError::MissingField;

    let title = candidate.title.ok_or(MissingField("title"))?;
    let url = candidate.url.ok_or(MissingField("url"))?;
    let description = candidate.description.ok_or(MissingField("description"))?;
    let rating = candidate.rating.ok_or(MissingField("rating"))?;

    let rating = parse_rating(&rating).ok_or(ValidationError::InvalidRating)?;

    Ok(NewBookmark {
        title,
        url,
        description,
        rating,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const REQUIRED_FIELDS: [&str; 4] = ["title", "url", "description", "rating"];

    fn candidate(body: Value) -> BookmarkCandidate {
        serde_json::from_value(body).unwrap()
    }

    fn full() -> Value {
        json!({ "title": "T", "url": "u.com", "description": "d", "rating": "5" })
    }

    #[test]
    fn accepts_complete_body() {
        let new = validate_create(candidate(full())).unwrap();
        assert_eq!(
            new,
            NewBookmark {
                title: "T".to_string(),
                url: "u.com".to_string(),
                description: "d".to_string(),
                rating: 5,
            }
        );
    }

    #[test]
    fn reports_each_missing_field() {
        for field in REQUIRED_FIELDS {
            let mut body = full();
            body.as_object_mut().unwrap().remove(field);
            assert_eq!(
                validate_create(candidate(body)),
                Err(ValidationError::MissingField(field)),
                "omitting {field}"
            );
        }
    }

    #[test]
    fn null_counts_as_missing() {
        let mut body = full();
        body["description"] = Value::Null;
        assert_eq!(
            validate_create(candidate(body)),
            Err(ValidationError::MissingField("description"))
        );
    }

    #[test]
    fn reports_first_missing_field_only() {
        let body = json!({ "description": "d" });
        assert_eq!(
            validate_create(candidate(body)),
            Err(ValidationError::MissingField("title"))
        );
    }

    #[test]
    fn empty_strings_are_present() {
        let body = json!({ "title": "", "url": "", "description": "", "rating": 1 });
        assert!(validate_create(candidate(body)).is_ok());
    }

    #[test]
    fn rating_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_rating(&json!(10)), Some(10));
        assert_eq!(parse_rating(&json!("1")), Some(1));
        assert_eq!(parse_rating(&json!(" 7 ")), Some(7));
    }

    #[test]
    fn rating_rejects_out_of_range_and_garbage() {
        for bad in [json!(0), json!(11), json!("eleven"), json!(4.5), json!(true), json!([5])] {
            let mut body = full();
            body["rating"] = bad.clone();
            assert_eq!(
                validate_create(candidate(body)),
                Err(ValidationError::InvalidRating),
                "rating {bad}"
            );
        }
    }
}
