//! Record types for the three hosted collections.
//!
//! Field names mirror the hosted table columns (`type` on the wire becomes
//! `employment_type` / `category` in Rust). Non-key text fields default to
//! empty so that partially filled rows — e.g. records published from
//! extracted text — still decode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A service listing in the classifieds section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    /// Absent means "inquire" ("Consultar" in the UI).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub clicks: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "type")]
    pub employment_type: String,
    /// Absent means "to be agreed" ("A combinar").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A point of interest in the places guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub category: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub maps_url: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Discriminant for the three record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Market,
    Job,
    Place,
}

/// One persisted record, tagged with its kind.
///
/// Every record fetched through the gateway carries its collection
/// explicitly, so the admin panel routes deletes on the known kind instead
/// of re-inferring it from field shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Market(MarketItem),
    Job(Job),
    Place(Place),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Market(_) => RecordKind::Market,
            Record::Job(_) => RecordKind::Job,
            Record::Place(_) => RecordKind::Place,
        }
    }

    /// The collection this record belongs to.
    pub fn collection(&self) -> Collection {
        match self {
            Record::Market(_) => Collection::MarketItems,
            Record::Job(_) => Collection::Jobs,
            Record::Place(_) => Collection::Places,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Record::Market(m) => &m.id,
            Record::Job(j) => &j.id,
            Record::Place(p) => &p.id,
        }
    }

    /// Display title (items and jobs have a `title`, places a `name`).
    pub fn display_title(&self) -> &str {
        match self {
            Record::Market(m) => &m.title,
            Record::Job(j) => &j.title,
            Record::Place(p) => &p.name,
        }
    }

    pub fn is_premium(&self) -> bool {
        match self {
            Record::Market(m) => m.is_premium,
            Record::Job(j) => j.is_premium,
            Record::Place(p) => p.is_premium,
        }
    }

    pub fn into_market(self) -> Option<MarketItem> {
        match self {
            Record::Market(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_job(self) -> Option<Job> {
        match self {
            Record::Job(j) => Some(j),
            _ => None,
        }
    }

    pub fn into_place(self) -> Option<Place> {
        match self {
            Record::Place(p) => Some(p),
            _ => None,
        }
    }
}

/// The three hosted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    MarketItems,
    Jobs,
    Places,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::MarketItems, Collection::Jobs, Collection::Places];

    /// Wire table name on the hosted backend.
    pub fn table(&self) -> &'static str {
        match self {
            Collection::MarketItems => "market_items",
            Collection::Jobs => "jobs",
            Collection::Places => "places",
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Collection::MarketItems => RecordKind::Market,
            Collection::Jobs => RecordKind::Job,
            Collection::Places => RecordKind::Place,
        }
    }

    /// Infer the collection of an untagged field map from field presence:
    /// `company` routes to jobs, `category` (without `company`) to market
    /// items, anything else to places.
    ///
    /// Only a fallback for payloads whose collection was never tracked; a
    /// job missing its `company` or a place carrying a `category` would
    /// misroute, so records fetched through the gateway carry an explicit
    /// [`RecordKind`] instead.
    pub fn infer(fields: &serde_json::Map<String, serde_json::Value>) -> Collection {
        if fields.contains_key("company") {
            Collection::Jobs
        } else if fields.contains_key("category") {
            Collection::MarketItems
        } else {
            Collection::Places
        }
    }

    /// Decode a raw row from this collection into a tagged [`Record`].
    pub fn decode(&self, row: serde_json::Value) -> Result<Record, serde_json::Error> {
        Ok(match self {
            Collection::MarketItems => Record::Market(serde_json::from_value(row)?),
            Collection::Jobs => Record::Job(serde_json::from_value(row)?),
            Collection::Places => Record::Place(serde_json::from_value(row)?),
        })
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

/// Proof of an authenticated admin identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
