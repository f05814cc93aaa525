//! The built-in default catalog and its example reviews.
//!
//! The default items carry rating fields baked into their definitions; they
//! are not derived from the default reviews.

use chrono::{DateTime, Utc};
use revue_core::{
  item::{Item, NewItem},
  review::Review,
};

use crate::{Result, encode::decode_collection};

const ITEMS_JSON: &str = include_str!("../seed/items.json");
const REVIEWS_JSON: &str = include_str!("../seed/reviews.json");

/// The default items, numbered from 1 in file order and stamped with `now`.
pub fn default_items(now: DateTime<Utc>) -> Result<Vec<Item>> {
  let drafts: Vec<NewItem> = decode_collection("seed/items.json", ITEMS_JSON)?;
  Ok(
    drafts
      .into_iter()
      .zip(1..)
      .map(|(draft, id)| Item::from_draft(id, now, draft))
      .collect(),
  )
}

/// The default reviews, with their fixed ids, vote counts and timestamps.
pub fn default_reviews() -> Result<Vec<Review>> {
  decode_collection("seed/reviews.json", REVIEWS_JSON)
}
