use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{ItemError, ItemResult, NAME_REQUIRED};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Item as stored in the `items` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Store-assigned id, never reused
    pub id: i64,
    /// Unique item name
    pub name: String,
    /// Free text, empty when not given
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every successful update
    pub updated_at: DateTime<Utc>,
}

/// Body returned by a successful create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatedItem {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl From<Item> for CreatedItem {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
        }
    }
}

/// DTO for creating a new item
///
/// `name` is optional at the serde level so that a missing key, `null` and
/// `""` all surface as the same validation failure.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateItem {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    #[schema(example = "Test Item")]
    pub name: Option<String>,
    #[schema(example = "A test item")]
    pub description: Option<String>,
}

/// DTO for replacing an item's name and description
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateItem {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, message = "Name is required")
    )]
    pub name: Option<String>,
    /// Omitted means empty
    pub description: Option<String>,
}

/// Validated name and description, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: String,
}

impl NewItem {
    fn from_parts(name: Option<String>, description: Option<String>) -> ItemResult<Self> {
        let name = name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ItemError::Validation(NAME_REQUIRED.to_string()))?;

        Ok(Self {
            name,
            description: description.unwrap_or_default(),
        })
    }
}

impl TryFrom<CreateItem> for NewItem {
    type Error = ItemError;

    fn try_from(input: CreateItem) -> ItemResult<Self> {
        Self::from_parts(input.name, input.description)
    }
}

impl TryFrom<UpdateItem> for NewItem {
    type Error = ItemError;

    fn try_from(input: UpdateItem) -> ItemResult<Self> {
        Self::from_parts(input.name, input.description)
    }
}

/// Raw list query string.
///
/// `page` and `limit` stay strings here; [`ListQuery::page_request`] applies
/// the lenient integer coercion.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Substring to match against the name
    pub name: Option<String>,
    /// Substring to match against the description
    pub description: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Page size (default 10)
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn filter(&self) -> ItemFilter {
        ItemFilter {
            name: non_empty(self.name.as_deref()),
            description: non_empty(self.description.as_deref()),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest {
            page: coerce_positive(self.page.as_deref(), DEFAULT_PAGE),
            limit: coerce_positive(self.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Substring filters, combined with AND. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Page window, both fields at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit.max(1))
    }
}

/// Leading-integer parse: skips leading whitespace, takes an optional sign
/// and then as many digits as follow (`"2abc"` is 2). `None` when no digit
/// follows. Out-of-range values saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}

fn coerce_positive(raw: Option<&str>, default: u64) -> u64 {
    match raw.and_then(parse_leading_int) {
        Some(n) if n >= 1 => n as u64,
        Some(_) => 1,
        None => default,
    }
}

/// One page of list results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage {
    /// Items matching the filter, ignoring pagination
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub data: Vec<Item>,
}
