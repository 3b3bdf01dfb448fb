//! Wishlist item record and the expiry policy.
//!
//! DESIGN
//! ======
//! Items are immutable once created. Display fields are captured at save
//! time and never re-fetched, so they may drift from the live product.
//! `expires_at` is always `created_at + ITEM_TTL_HOURS`; the constructor is
//! the only place that sets it.
//!
//! WIRE FORMAT
//! ===========
//! Serialized as camelCase JSON with RFC 3339 UTC timestamps at millisecond
//! precision (`2025-03-01T12:00:00.000Z`), the same shape a browser writes
//! with `Date.prototype.toISOString`.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of a saved item, in hours.
pub const ITEM_TTL_HOURS: i64 = 24;

/// Lifetime of a saved item.
#[must_use]
pub fn item_ttl() -> TimeDelta {
    TimeDelta::hours(ITEM_TTL_HOURS)
}

// =============================================================================
// ITEM
// =============================================================================

/// One product saved by the current user for a bounded time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// Unique identifier of this saved-item record.
    pub id: Uuid,
    /// Identifier of the underlying product.
    pub product_id: String,
    /// Product name at save time.
    pub product_name: String,
    /// Product price at save time.
    pub product_price: f64,
    /// Product image URL or path at save time.
    pub product_image: String,
    /// When the item stops being active.
    #[serde(with = "timestamp")]
    pub expires_at: DateTime<Utc>,
    /// When the item was saved.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl WishlistItem {
    /// Create a fresh item saved at `now`, expiring one TTL later.
    #[must_use]
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        product_price: f64,
        product_image: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: product_id.into(),
            product_name: product_name.into(),
            product_price,
            product_image: product_image.into(),
            expires_at: now + item_ttl(),
            created_at: now,
        }
    }

    /// An item is expired once `now` reaches `expires_at`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Time left before expiry, clamped at zero.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> TimeDelta {
        (self.expires_at - now).max(TimeDelta::zero())
    }

    /// Render the time left for listing pages: `"23h 05m"`, `"4m"`, `"<1m"`
    /// or `"expired"`.
    #[must_use]
    pub fn format_remaining(&self, now: DateTime<Utc>) -> String {
        if self.is_expired(now) {
            return "expired".into();
        }
        let remaining = self.remaining(now);
        let hours = remaining.num_hours();
        let minutes = remaining.num_minutes() % 60;
        match (hours, minutes) {
            (0, 0) => "<1m".into(),
            (0, m) => format!("{m}m"),
            (h, m) => format!("{h}h {m:02}m"),
        }
    }
}

// =============================================================================
// TIMESTAMP CODEC
// =============================================================================

mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub(super) fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
#[path = "item_test.rs"]
mod tests;
