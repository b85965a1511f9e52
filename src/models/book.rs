//! Book model and request types

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    /// Price, serialized as a JSON number
    #[schema(value_type = f64)]
    pub price: Decimal,
}

/// Create book request (any `id` sent by the client is ignored)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
}

/// Full replacement, every field required
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReplaceBook {
    pub title: String,
    pub author: String,
    #[param(value_type = f64)]
    pub price: Decimal,
}

/// Partial update. Blank text fields are skipped.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatchBook {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[param(value_type = Option<f64>)]
    pub price: Option<Decimal>,
}

/// Optional price parameter; `?price=` counts as absent
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => Decimal::from_str(s.trim())
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub offset: i64,
    pub limit: i64,
}

/// Filter by price, sort by price, then paginate
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AdvancedQuery {
    pub offset: i64,
    pub limit: i64,
    /// Keep books priced strictly above the cutoff (otherwise strictly below)
    pub price_above: bool,
    #[param(value_type = f64)]
    pub cutoff_price: Decimal,
    pub ascending: bool,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PriceRangeQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    #[param(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[param(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// "author" or "title" (anything else sorts by title)
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// "asc" or "desc"
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_sort_by() -> String {
    "title".to_string()
}

fn default_order() -> String {
    "asc".to_string()
}

/// Sort key for `/books/sorted`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Author,
    Title,
}

impl From<&str> for SortField {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "author" => SortField::Author,
            _ => SortField::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl From<&str> for SortOrder {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }
}
