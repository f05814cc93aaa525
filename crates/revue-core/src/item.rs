//! Items — the reviewable catalog entries (hotels, in the shipped catalog).
//!
//! An item's `rating_avg`, `review_count` and `category_ratings` are derived
//! from its reviews by [`crate::aggregate`]; every other field is owned by
//! whoever created the item.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;

// ─── Info ────────────────────────────────────────────────────────────────────

/// The fixed practical-information block shown alongside an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemInfo {
  pub check_in:  String,
  pub check_out: String,
  pub wifi:      String,
  pub parking:   String,
  pub pets:      String,
}

// ─── Item ────────────────────────────────────────────────────────────────────

/// A persisted catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
  /// Server-assigned; one greater than the largest id present at creation.
  pub id:               u64,
  pub name:             String,
  pub category:         String,
  pub location:         String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image:            Option<String>,
  #[serde(default)]
  pub gallery:          Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub instagram:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub facebook:         Option<String>,
  /// Mean review rating to one decimal; `None` until the first aggregation.
  #[serde(default)]
  pub rating_avg:       Option<f64>,
  #[serde(default)]
  pub review_count:     u32,
  #[serde(default)]
  pub category_ratings: BTreeMap<Category, f64>,
  #[serde(default)]
  pub info:             ItemInfo,
  #[serde(default)]
  pub amenities:        Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location_details: Option<String>,
  pub created_at:       DateTime<Utc>,
}

impl Item {
  /// Build the stored record from a draft. `id` and `created_at` come from
  /// the store.
  pub fn from_draft(id: u64, created_at: DateTime<Utc>, draft: NewItem) -> Self {
    Self {
      id,
      name: draft.name,
      category: draft.category,
      location: draft.location,
      image: draft.image,
      gallery: draft.gallery,
      instagram: draft.instagram,
      facebook: draft.facebook,
      rating_avg: draft.rating_avg,
      review_count: draft.review_count,
      category_ratings: draft.category_ratings,
      info: draft.info,
      amenities: draft.amenities,
      location_details: draft.location_details,
      created_at,
    }
  }
}

// ─── NewItem ─────────────────────────────────────────────────────────────────

/// Input to [`crate::catalog::Catalog::create_item`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewItem {
  pub name:             String,
  pub category:         String,
  pub location:         String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image:            Option<String>,
  pub gallery:          Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub instagram:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub facebook:         Option<String>,
  pub rating_avg:       Option<f64>,
  pub review_count:     u32,
  pub category_ratings: BTreeMap<Category, f64>,
  pub info:             ItemInfo,
  pub amenities:        Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location_details: Option<String>,
}

impl NewItem {
  /// Convenience constructor with every optional field left empty.
  pub fn new(
    name: impl Into<String>,
    category: impl Into<String>,
    location: impl Into<String>,
  ) -> Self {
    Self {
      name: name.into(),
      category: category.into(),
      location: location.into(),
      ..Self::default()
    }
  }
}

// ─── ItemPatch ───────────────────────────────────────────────────────────────

/// A shallow partial update: `Some` fields overwrite, `None` fields are kept.
///
/// `id` and `created_at` are not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:             Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image:            Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub gallery:          Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub instagram:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub facebook:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rating_avg:       Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub review_count:     Option<u32>,
  /// Replaces the whole map; it is not merged key by key.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category_ratings: Option<BTreeMap<Category, f64>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub info:             Option<ItemInfo>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub amenities:        Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub location_details: Option<String>,
}

impl ItemPatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }

  /// Merge this patch into `item` in place.
  pub fn apply(self, item: &mut Item) {
    if let Some(v) = self.name {
      item.name = v;
    }
    if let Some(v) = self.category {
      item.category = v;
    }
    if let Some(v) = self.location {
      item.location = v;
    }
    if let Some(v) = self.image {
      item.image = Some(v);
    }
    if let Some(v) = self.gallery {
      item.gallery = v;
    }
    if let Some(v) = self.instagram {
      item.instagram = Some(v);
    }
    if let Some(v) = self.facebook {
      item.facebook = Some(v);
    }
    if let Some(v) = self.rating_avg {
      item.rating_avg = Some(v);
    }
    if let Some(v) = self.review_count {
      item.review_count = v;
    }
    if let Some(v) = self.category_ratings {
      item.category_ratings = v;
    }
    if let Some(v) = self.info {
      item.info = v;
    }
    if let Some(v) = self.amenities {
      item.amenities = v;
    }
    if let Some(v) = self.location_details {
      item.location_details = Some(v);
    }
  }
}
