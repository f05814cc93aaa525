//! [`KvCatalog`] — the key-value implementation of [`Catalog`].

use chrono::Utc;
use revue_core::{
  aggregate,
  catalog::{Catalog, CatalogOptions},
  item::{Item, ItemPatch, NewItem},
  review::{NewReview, Review, ReviewPatch, Vote},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::{
  Error, KeyValueStore, Result,
  encode::{decode_collection, encode_collection, next_id},
  seed::{default_items, default_reviews},
};

// ─── Catalog ─────────────────────────────────────────────────────────────────

/// A review catalog kept as two JSON documents in a [`KeyValueStore`].
///
/// Every operation reads the whole affected collection, changes it in memory
/// and writes it back. There is no locking: two catalogs sharing one host can
/// lose each other's updates.
pub struct KvCatalog<S> {
  store:   S,
  options: CatalogOptions,
}

impl<S: KeyValueStore> KvCatalog<S> {
  /// Wrap `store` without writing anything to it.
  pub fn new(store: S, options: CatalogOptions) -> Self { Self { store, options } }

  /// Wrap `store` and seed the default reviews if it has none yet.
  pub fn open(store: S, options: CatalogOptions) -> Result<Self> {
    let mut catalog = Self::new(store, options);
    catalog.seed_default_reviews()?;
    Ok(catalog)
  }

  pub fn options(&self) -> &CatalogOptions { &self.options }

  pub fn store(&self) -> &S { &self.store }

  pub fn into_inner(self) -> S { self.store }

  // ── Raw collection access ─────────────────────────────────────────────────

  fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>> {
    self
      .store
      .get(key)
      .map_err(Error::host)?
      .map(|raw| decode_collection(key, &raw))
      .transpose()
  }

  fn write<T: Serialize>(&mut self, key: &str, records: &[T]) -> Result<()> {
    let text = encode_collection(records)?;
    self.store.set(key, &text).map_err(Error::host)
  }

  fn load_items(&self) -> Result<Vec<Item>> {
    match self.read(&self.options.items_key)? {
      Some(items) => Ok(items),
      None => default_items(Utc::now()),
    }
  }

  fn save_items(&mut self, items: &[Item]) -> Result<()> {
    let key = self.options.items_key.clone();
    self.write(&key, items)
  }

  fn load_reviews(&self) -> Result<Vec<Review>> {
    Ok(self.read(&self.options.reviews_key)?.unwrap_or_default())
  }

  fn save_reviews(&mut self, reviews: &[Review]) -> Result<()> {
    let key = self.options.reviews_key.clone();
    self.write(&key, reviews)
  }
}

// ─── Catalog impl ────────────────────────────────────────────────────────────

impl<S: KeyValueStore> Catalog for KvCatalog<S> {
  type Error = Error;

  // ── Items ─────────────────────────────────────────────────────────────────

  fn list_items(&self) -> Result<Vec<Item>> { self.load_items() }

  fn get_item(&self, id: u64) -> Result<Option<Item>> {
    Ok(self.load_items()?.into_iter().find(|item| item.id == id))
  }

  fn create_item(&mut self, draft: NewItem) -> Result<Item> {
    let mut items = self.load_items()?;
    let item = Item::from_draft(next_id(items.iter().map(|i| i.id)), Utc::now(), draft);

    items.push(item.clone());
    self.save_items(&items)?;

    debug!(item_id = item.id, name = %item.name, "created item");
    Ok(item)
  }

  fn update_item(&mut self, id: u64, patch: ItemPatch) -> Result<Option<Item>> {
    let mut items = self.load_items()?;
    let Some(item) = items.iter_mut().find(|item| item.id == id) else {
      return Ok(None);
    };

    patch.apply(item);
    let updated = item.clone();
    self.save_items(&items)?;

    debug!(item_id = id, "updated item");
    Ok(Some(updated))
  }

  fn delete_item(&mut self, id: u64) -> Result<()> {
    let mut items = self.load_items()?;
    let before = items.len();
    items.retain(|item| item.id != id);
    if items.len() != before {
      self.save_items(&items)?;
    }

    let mut reviews = self.load_reviews()?;
    let before = reviews.len();
    reviews.retain(|review| review.item_id != id);
    let removed = before - reviews.len();
    if removed > 0 {
      self.save_reviews(&reviews)?;
    }

    debug!(item_id = id, reviews_removed = removed, "deleted item");
    Ok(())
  }

  fn reset_to_defaults(&mut self) -> Result<()> {
    let items = default_items(Utc::now())?;
    self.save_items(&items)?;

    let key = self.options.reviews_key.clone();
    self.store.remove(&key).map_err(Error::host)?;
    self.seed_default_reviews()?;

    info!(items = items.len(), "catalog reset to defaults");
    Ok(())
  }

  // ── Reviews ───────────────────────────────────────────────────────────────

  fn list_reviews(&self) -> Result<Vec<Review>> { self.load_reviews() }

  fn list_reviews_for_item(&self, item_id: u64) -> Result<Vec<Review>> {
    let mut reviews = self.load_reviews()?;
    reviews.retain(|review| review.item_id == item_id);
    Ok(reviews)
  }

  fn create_review(&mut self, draft: NewReview) -> Result<Review> {
    draft.validate()?;
    if self.get_item(draft.item_id)?.is_none() {
      return Err(revue_core::Error::ItemNotFound(draft.item_id).into());
    }

    let mut reviews = self.load_reviews()?;
    let review = Review::from_draft(next_id(reviews.iter().map(|r| r.id)), Utc::now(), draft);

    reviews.push(review.clone());
    self.save_reviews(&reviews)?;
    debug!(review_id = review.id, item_id = review.item_id, "created review");

    self.recompute(review.item_id)?;
    Ok(review)
  }

  fn update_review(&mut self, id: u64, patch: ReviewPatch) -> Result<Option<Review>> {
    let rescore = self.options.recompute_on_review_update && patch.touches_ratings();

    let mut reviews = self.load_reviews()?;
    let Some(review) = reviews.iter_mut().find(|review| review.id == id) else {
      return Ok(None);
    };
    patch.validate()?;

    patch.apply(review);
    let updated = review.clone();
    self.save_reviews(&reviews)?;
    debug!(review_id = id, "updated review");

    if rescore {
      self.recompute(updated.item_id)?;
    }
    Ok(Some(updated))
  }

  fn delete_review(&mut self, id: u64) -> Result<Option<Review>> {
    let mut reviews = self.load_reviews()?;
    let Some(index) = reviews.iter().position(|review| review.id == id) else {
      return Ok(None);
    };

    let removed = reviews.remove(index);
    self.save_reviews(&reviews)?;
    debug!(review_id = id, item_id = removed.item_id, "deleted review");

    self.recompute(removed.item_id)?;
    Ok(Some(removed))
  }

  fn vote_helpful(&mut self, id: u64, vote: Vote) -> Result<Option<Review>> {
    let mut reviews = self.load_reviews()?;
    let Some(review) = reviews.iter_mut().find(|review| review.id == id) else {
      return Ok(None);
    };

    review.record_vote(vote);
    let updated = review.clone();
    self.save_reviews(&reviews)?;

    debug!(review_id = id, ?vote, "recorded vote");
    Ok(Some(updated))
  }

  // ── Aggregation ───────────────────────────────────────────────────────────

  fn recompute(&mut self, item_id: u64) -> Result<Option<Item>> {
    let reviews = self.list_reviews_for_item(item_id)?;
    let Some(summary) = aggregate::summarize(&reviews) else {
      // Averages of nothing are undefined: keep the last ones, zero the count.
      debug!(item_id, "no reviews left; ratings kept");
      let patch = ItemPatch { review_count: Some(0), ..ItemPatch::default() };
      return self.update_item(item_id, patch);
    };

    debug!(
      item_id,
      rating_avg = summary.rating_avg,
      review_count = summary.review_count,
      "recomputed ratings"
    );
    self.update_item(item_id, summary.into())
  }

  // ── Bootstrap ─────────────────────────────────────────────────────────────

  fn seed_default_reviews(&mut self) -> Result<bool> {
    if !self.load_reviews()?.is_empty() {
      return Ok(false);
    }

    let reviews = default_reviews()?;
    self.save_reviews(&reviews)?;

    info!(reviews = reviews.len(), "seeded default reviews");
    Ok(true)
  }
}
