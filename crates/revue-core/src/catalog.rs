//! The `Catalog` trait and its options.
//!
//! The trait is implemented by storage backends (e.g. `revue-store-kv`).
//! Front ends depend on this abstraction, not on any concrete backend.

use serde::{Deserialize, Serialize};

use crate::{
  item::{Item, ItemPatch, NewItem},
  review::{NewReview, Review, ReviewPatch, Vote},
};

// ─── Options ─────────────────────────────────────────────────────────────────

pub const DEFAULT_ITEMS_KEY: &str = "review_platform_items";
pub const DEFAULT_REVIEWS_KEY: &str = "review_platform_reviews";

/// Behavioural knobs shared by all backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
  /// Storage key holding the serialised item collection.
  pub items_key:                  String,
  /// Storage key holding the serialised review collection.
  pub reviews_key:                String,
  /// Re-derive the item's ratings when `update_review` changes a score.
  /// Off by default: only creating and deleting reviews re-aggregates.
  pub recompute_on_review_update: bool,
}

impl Default for CatalogOptions {
  fn default() -> Self {
    Self {
      items_key:                  DEFAULT_ITEMS_KEY.to_owned(),
      reviews_key:                DEFAULT_REVIEWS_KEY.to_owned(),
      recompute_on_review_update: false,
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A catalog of items and their reviews.
///
/// Every call is a complete read-modify-write of the affected collections.
/// Lookups by id report absence as `Ok(None)` rather than an error.
pub trait Catalog {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Items ─────────────────────────────────────────────────────────────

  /// All items in storage order, or the built-in default catalog when no
  /// item collection has ever been written.
  fn list_items(&self) -> Result<Vec<Item>, Self::Error>;

  fn get_item(&self, id: u64) -> Result<Option<Item>, Self::Error>;

  /// Persist a new item. Its id is one greater than the current largest id
  /// (or 1 for an empty collection), so ids of deleted items can come back.
  fn create_item(&mut self, draft: NewItem) -> Result<Item, Self::Error>;

  fn update_item(
    &mut self,
    id: u64,
    patch: ItemPatch,
  ) -> Result<Option<Item>, Self::Error>;

  /// Delete an item together with all of its reviews. Unknown ids are a no-op.
  fn delete_item(&mut self, id: u64) -> Result<(), Self::Error>;

  /// Restore the default catalog and the default reviews, discarding
  /// everything else.
  fn reset_to_defaults(&mut self) -> Result<(), Self::Error>;

  // ── Reviews ───────────────────────────────────────────────────────────

  fn list_reviews(&self) -> Result<Vec<Review>, Self::Error>;

  fn list_reviews_for_item(&self, item_id: u64) -> Result<Vec<Review>, Self::Error>;

  /// Persist a new review and re-derive its item's ratings.
  fn create_review(&mut self, draft: NewReview) -> Result<Review, Self::Error>;

  /// Merge `patch` into a review. Ratings are re-derived only when
  /// [`CatalogOptions::recompute_on_review_update`] is set.
  fn update_review(
    &mut self,
    id: u64,
    patch: ReviewPatch,
  ) -> Result<Option<Review>, Self::Error>;

  /// Delete a review and re-derive its former item's ratings. Returns the
  /// deleted review, or `None` when the id was unknown (a no-op).
  fn delete_review(&mut self, id: u64) -> Result<Option<Review>, Self::Error>;

  /// Count one helpfulness vote. Returns the updated review, or `None` when
  /// the id was unknown. Never touches item ratings.
  fn vote_helpful(
    &mut self,
    id: u64,
    vote: Vote,
  ) -> Result<Option<Review>, Self::Error>;

  // ── Aggregation ───────────────────────────────────────────────────────

  /// Re-derive `item_id`'s rating fields from its current reviews.
  ///
  /// When the item has no reviews, `rating_avg` and `category_ratings` are
  /// left as they were and only `review_count` drops to zero. Returns the
  /// updated item, or `None` if the item does not exist.
  fn recompute(&mut self, item_id: u64) -> Result<Option<Item>, Self::Error>;

  // ── Bootstrap ─────────────────────────────────────────────────────────

  /// Write the default reviews if the review collection is empty. Item
  /// ratings are not re-derived. Returns whether anything was written.
  fn seed_default_reviews(&mut self) -> Result<bool, Self::Error>;
}
