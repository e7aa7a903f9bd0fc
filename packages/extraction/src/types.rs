//! Extraction result types and response-contract validation.
//!
//! The wire contract is an object with a required `"type"` enum field and a
//! required `"data"` object. [`parse_response`] enforces it and immediately
//! validates the field set against the typed shape for the category, so a
//! shape the service got wrong surfaces as a schema violation instead of a
//! half-broken record downstream.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// The three listing categories the service classifies into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Market,
    Job,
    Place,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Market => "market",
            Category::Job => "job",
            Category::Place => "place",
        }
    }

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "market" => Some(Category::Market),
            "job" => Some(Category::Job),
            "place" => Some(Category::Place),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A categorized listing extracted from raw text.
///
/// `fields` preserves the order the service emitted; leaf values are
/// rendered to strings so the map can be inserted into any collection
/// directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedListing {
    pub category: Category,
    pub fields: IndexMap<String, String>,
}

impl ExtractedListing {
    /// Field map shaped for a storage insert.
    pub fn insert_fields(&self) -> serde_json::Map<String, serde_json::Value> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect()
    }

    /// Typed view of the field set for this category.
    pub fn typed(&self) -> Result<ListingFields> {
        ListingFields::from_listing(self)
    }
}

/// Parse and validate a raw service payload.
pub fn parse_response(payload: &str) -> Result<ExtractedListing> {
    let value: serde_json::Value = serde_json::from_str(payload)?;
    let object = value
        .as_object()
        .ok_or_else(|| ExtractError::schema("top-level payload is not an object"))?;

    let kind = object
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or_else(|| ExtractError::schema("missing required \"type\" field"))?;
    let category = Category::from_wire(kind)
        .ok_or_else(|| ExtractError::schema(format!("unknown category \"{kind}\"")))?;

    let data = object
        .get("data")
        .ok_or_else(|| ExtractError::schema("missing required \"data\" field"))?
        .as_object()
        .ok_or_else(|| ExtractError::schema("\"data\" is not an object"))?;
    if data.is_empty() {
        return Err(ExtractError::schema("\"data\" object is empty"));
    }

    let fields: IndexMap<String, String> = data
        .iter()
        .map(|(k, v)| (k.clone(), render_field(v)))
        .collect();

    let listing = ExtractedListing { category, fields };
    // Reject shapes the storage collections cannot represent.
    listing.typed()?;
    Ok(listing)
}

/// Render a JSON leaf to its field-map string form.
///
/// The service is instructed to emit strings, but numbers and booleans show
/// up in practice (prices, ratings); nested values fall back to compact JSON.
fn render_field(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Typed field sets, one per category.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingFields {
    Market(MarketFields),
    Job(JobFields),
    Place(PlaceFields),
}

/// Fields of a service listing. Only `title` is required.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarketFields {
    pub title: String,
    pub category: Option<String>,
    pub price: Option<String>,
    pub whatsapp: Option<String>,
    pub description: Option<String>,
}

/// Fields of a job posting. Only `title` is required.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobFields {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub salary: Option<String>,
    pub description: Option<String>,
}

/// Fields of a place. Only `name` is required.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceFields {
    pub name: String,
    pub category: Option<String>,
    pub address: Option<String>,
    pub maps_url: Option<String>,
    pub description: Option<String>,
}

impl ListingFields {
    fn from_listing(listing: &ExtractedListing) -> Result<Self> {
        let get = |key: &str| listing.fields.get(key).cloned().filter(|v| !v.is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| {
                ExtractError::schema(format!(
                    "{} listing missing required field \"{key}\"",
                    listing.category
                ))
            })
        };

        Ok(match listing.category {
            Category::Market => ListingFields::Market(MarketFields {
                title: require("title")?,
                category: get("category"),
                price: get("price"),
                whatsapp: get("whatsapp"),
                description: get("description"),
            }),
            Category::Job => ListingFields::Job(JobFields {
                title: require("title")?,
                company: get("company"),
                location: get("location"),
                employment_type: get("type"),
                salary: get("salary"),
                description: get("description"),
            }),
            Category::Place => ListingFields::Place(PlaceFields {
                name: require("name")?,
                category: get("type").or_else(|| get("category")),
                address: get("address"),
                maps_url: get("maps_url"),
                description: get("description"),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_job() {
        let payload = r#"{"type":"job","data":{"title":"Garçom","company":"Bistro X"}}"#;
        let listing = parse_response(payload).unwrap();
        assert_eq!(listing.category, Category::Job);
        assert_eq!(listing.fields.get("title").unwrap(), "Garçom");

        match listing.typed().unwrap() {
            ListingFields::Job(job) => {
                assert_eq!(job.title, "Garçom");
                assert_eq!(job.company.as_deref(), Some("Bistro X"));
                assert_eq!(job.salary, None);
            }
            other => panic!("expected job fields, got {other:?}"),
        }
    }

    #[test]
    fn parse_malformed_json_is_error() {
        let err = parse_response("not json at all {").unwrap_err();
        assert!(matches!(err, ExtractError::JsonParse(_)));
    }

    #[test]
    fn parse_missing_type_is_schema_violation() {
        let err = parse_response(r#"{"data":{"title":"x"}}"#).unwrap_err();
        assert!(matches!(err, ExtractError::SchemaViolation { .. }));
    }

    #[test]
    fn parse_unknown_category_is_schema_violation() {
        let err = parse_response(r#"{"type":"event","data":{"title":"x"}}"#).unwrap_err();
        assert!(matches!(err, ExtractError::SchemaViolation { .. }));
    }

    #[test]
    fn parse_non_object_data_is_schema_violation() {
        let err = parse_response(r#"{"type":"job","data":"Garçom"}"#).unwrap_err();
        assert!(matches!(err, ExtractError::SchemaViolation { .. }));

        let err = parse_response(r#"{"type":"job","data":{}}"#).unwrap_err();
        assert!(matches!(err, ExtractError::SchemaViolation { .. }));
    }

    #[test]
    fn parse_market_missing_title_is_schema_violation() {
        let err = parse_response(r#"{"type":"market","data":{"price":"30€"}}"#).unwrap_err();
        assert!(matches!(err, ExtractError::SchemaViolation { .. }));
    }

    #[test]
    fn parse_place_requires_name() {
        let payload = r#"{"type":"place","data":{"name":"Café do Brasil","address":"Paris 11"}}"#;
        let listing = parse_response(payload).unwrap();
        match listing.typed().unwrap() {
            ListingFields::Place(place) => {
                assert_eq!(place.name, "Café do Brasil");
                assert_eq!(place.address.as_deref(), Some("Paris 11"));
            }
            other => panic!("expected place fields, got {other:?}"),
        }
    }

    #[test]
    fn non_string_leaves_are_rendered() {
        let payload = r#"{"type":"market","data":{"title":"Limpeza","price":35,"urgent":true}}"#;
        let listing = parse_response(payload).unwrap();
        assert_eq!(listing.fields.get("price").unwrap(), "35");
        assert_eq!(listing.fields.get("urgent").unwrap(), "true");
    }

    #[test]
    fn insert_fields_are_all_strings() {
        let payload = r#"{"type":"market","data":{"title":"Limpeza","price":35}}"#;
        let listing = parse_response(payload).unwrap();
        let fields = listing.insert_fields();
        assert!(fields.values().all(|v| v.is_string()));
        assert_eq!(fields["title"], serde_json::json!("Limpeza"));
    }
}
