//! Derivation of an item's rating fields from its reviews.
//!
//! Pure functions only; wiring the result back into storage is the job of the
//! [`Catalog`](crate::catalog::Catalog) implementation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator as _;

use crate::{category::Category, item::ItemPatch, review::Review};

/// The derived rating fields of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
  pub rating_avg:       f64,
  pub review_count:     u32,
  /// Only categories scored by at least one review appear here.
  pub category_ratings: BTreeMap<Category, f64>,
}

/// Summarise `reviews`, which must all belong to the same item.
///
/// Returns `None` for an empty slice: an item that loses its last review keeps
/// whatever rating fields it had.
pub fn summarize(reviews: &[Review]) -> Option<RatingSummary> {
  if reviews.is_empty() {
    return None;
  }

  let count = reviews.len() as u64;
  let total: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();

  let mut category_ratings = BTreeMap::new();
  for category in Category::iter() {
    // A zero score counts as "not scored".
    let scores: Vec<u64> = reviews
      .iter()
      .filter_map(|r| r.category_ratings.get(&category).copied())
      .filter(|&score| score != 0)
      .map(u64::from)
      .collect();

    if !scores.is_empty() {
      let sum = scores.iter().sum();
      category_ratings.insert(category, mean_to_tenth(sum, scores.len() as u64));
    }
  }

  Some(RatingSummary {
    rating_avg: mean_to_tenth(total, count),
    review_count: u32::try_from(count).unwrap_or(u32::MAX),
    category_ratings,
  })
}

/// `sum / count` rounded half-up to one decimal place.
///
/// Computed on integers so that ties such as 4.25 round predictably.
/// Rounding is exact-decimal: it rounds the true mean, so a tie such as
/// 87 / 20 = 4.35 gives 4.4 even though `4.35_f64` sits just below 4.35.
fn mean_to_tenth(sum: u64, count: u64) -> f64 {
  debug_assert!(count > 0);
  let tenths = (sum * 20 + count) / (count * 2);
  tenths as f64 / 10.0
}

impl From<RatingSummary> for ItemPatch {
  fn from(summary: RatingSummary) -> Self {
    Self {
      rating_avg: Some(summary.rating_avg),
      review_count: Some(summary.review_count),
      category_ratings: Some(summary.category_ratings),
      ..Self::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::review::NewReview;

  fn review(rating: u8, scores: &[(Category, u8)]) -> Review {
    let mut draft = NewReview::new(1, "tester", rating);
    for &(category, score) in scores {
      draft = draft.with_category(category, score);
    }
    Review::from_draft(0, Utc::now(), draft)
  }

  #[test]
  fn empty_input_yields_nothing() {
    assert_eq!(summarize(&[]), None);
  }

  #[test]
  fn averages_overall_rating() {
    let s = summarize(&[review(5, &[]), review(4, &[]), review(5, &[])]).unwrap();
    assert_eq!(s.rating_avg, 4.7);
    assert_eq!(s.review_count, 3);
    assert!(s.category_ratings.is_empty());
  }

  #[test]
  fn category_means_ignore_missing_and_zero_scores() {
    let s = summarize(&[
      review(5, &[(Category::Cleanliness, 4), (Category::Value, 0)]),
      review(3, &[]),
      review(4, &[(Category::Cleanliness, 5), (Category::Service, 3)]),
    ])
    .unwrap();

    assert_eq!(s.rating_avg, 4.0);
    assert_eq!(s.category_ratings[&Category::Cleanliness], 4.5);
    assert_eq!(s.category_ratings[&Category::Service], 3.0);
    assert!(!s.category_ratings.contains_key(&Category::Value));
    assert!(!s.category_ratings.contains_key(&Category::Location));
  }

  #[test]
  fn rounds_half_up() {
    assert_eq!(mean_to_tenth(17, 4), 4.3); // 4.25
    assert_eq!(mean_to_tenth(13, 3), 4.3); // 4.333…
    assert_eq!(mean_to_tenth(14, 3), 4.7); // 4.666…
    assert_eq!(mean_to_tenth(5, 1), 5.0);
    assert_eq!(mean_to_tenth(87, 20), 4.4); // 4.35
  }

  #[test]
  fn summary_becomes_full_rating_patch() {
    let patch: ItemPatch = summarize(&[review(2, &[])]).unwrap().into();
    assert_eq!(patch.rating_avg, Some(2.0));
    assert_eq!(patch.review_count, Some(1));
    assert_eq!(patch.category_ratings, Some(BTreeMap::new()));
    assert_eq!(patch.name, None);
  }
}
