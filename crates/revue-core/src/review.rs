//! Reviews — individual user evaluations of an item.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, category::Category};

/// Lowest and highest score a review may give, overall or per category.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

// ─── Review ──────────────────────────────────────────────────────────────────

/// A persisted review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
  pub id:               u64,
  /// The reviewed item. Deleting the item deletes the review.
  pub item_id:          u64,
  pub user_name:        String,
  #[serde(default)]
  pub country:          String,
  pub rating:           u8,
  #[serde(default)]
  pub title:            String,
  #[serde(default)]
  pub text:             String,
  #[serde(default)]
  pub pros:             String,
  #[serde(default)]
  pub cons:             String,
  /// Partial: a review may score any subset of the categories.
  #[serde(default)]
  pub category_ratings: BTreeMap<Category, u8>,
  /// The stay date, as entered by the reviewer.
  pub date:             NaiveDate,
  #[serde(default)]
  pub helpful:          u32,
  #[serde(default)]
  pub not_helpful:      u32,
  pub created_at:       DateTime<Utc>,
}

impl Review {
  /// Build the stored record from a draft. Vote counters start at zero.
  pub fn from_draft(id: u64, created_at: DateTime<Utc>, draft: NewReview) -> Self {
    Self {
      id,
      item_id: draft.item_id,
      user_name: draft.user_name,
      country: draft.country,
      rating: draft.rating,
      title: draft.title,
      text: draft.text,
      pros: draft.pros,
      cons: draft.cons,
      category_ratings: draft.category_ratings,
      date: draft.date,
      helpful: 0,
      not_helpful: 0,
      created_at,
    }
  }

  /// Record one helpfulness vote.
  pub fn record_vote(&mut self, vote: Vote) {
    match vote {
      Vote::Helpful => self.helpful = self.helpful.saturating_add(1),
      Vote::NotHelpful => self.not_helpful = self.not_helpful.saturating_add(1),
    }
  }
}

// ─── NewReview ───────────────────────────────────────────────────────────────

/// Input to [`crate::catalog::Catalog::create_review`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
  pub item_id:          u64,
  pub user_name:        String,
  #[serde(default)]
  pub country:          String,
  pub rating:           u8,
  #[serde(default)]
  pub title:            String,
  #[serde(default)]
  pub text:             String,
  #[serde(default)]
  pub pros:             String,
  #[serde(default)]
  pub cons:             String,
  #[serde(default)]
  pub category_ratings: BTreeMap<Category, u8>,
  pub date:             NaiveDate,
}

impl NewReview {
  /// Convenience constructor; the stay date defaults to today (UTC).
  pub fn new(item_id: u64, user_name: impl Into<String>, rating: u8) -> Self {
    Self {
      item_id,
      user_name: user_name.into(),
      country: String::new(),
      rating,
      title: String::new(),
      text: String::new(),
      pros: String::new(),
      cons: String::new(),
      category_ratings: BTreeMap::new(),
      date: Utc::now().date_naive(),
    }
  }

  pub fn with_category(mut self, category: Category, score: u8) -> Self {
    self.category_ratings.insert(category, score);
    self
  }

  pub fn validate(&self) -> Result<()> {
    validate_rating("rating", self.rating)?;
    validate_category_ratings(&self.category_ratings)
  }
}

// ─── ReviewPatch ─────────────────────────────────────────────────────────────

/// A shallow partial update of a review's content.
///
/// Identity, ownership and vote counters are not patchable; votes go through
/// [`crate::catalog::Catalog::vote_helpful`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_name:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub country:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rating:           Option<u8>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:            Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub text:             Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pros:             Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub cons:             Option<String>,
  /// Replaces the whole map.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category_ratings: Option<BTreeMap<Category, u8>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date:             Option<NaiveDate>,
}

impl ReviewPatch {
  /// Whether applying this patch can change the item's derived ratings.
  pub fn touches_ratings(&self) -> bool {
    self.rating.is_some() || self.category_ratings.is_some()
  }

  pub fn validate(&self) -> Result<()> {
    if let Some(rating) = self.rating {
      validate_rating("rating", rating)?;
    }
    if let Some(map) = &self.category_ratings {
      validate_category_ratings(map)?;
    }
    Ok(())
  }

  /// Merge this patch into `review` in place.
  pub fn apply(self, review: &mut Review) {
    if let Some(v) = self.user_name {
      review.user_name = v;
    }
    if let Some(v) = self.country {
      review.country = v;
    }
    if let Some(v) = self.rating {
      review.rating = v;
    }
    if let Some(v) = self.title {
      review.title = v;
    }
    if let Some(v) = self.text {
      review.text = v;
    }
    if let Some(v) = self.pros {
      review.pros = v;
    }
    if let Some(v) = self.cons {
      review.cons = v;
    }
    if let Some(v) = self.category_ratings {
      review.category_ratings = v;
    }
    if let Some(v) = self.date {
      review.date = v;
    }
  }
}

// ─── Votes ───────────────────────────────────────────────────────────────────

/// A reader's verdict on whether a review was useful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
  Helpful,
  NotHelpful,
}

impl From<bool> for Vote {
  fn from(is_helpful: bool) -> Self {
    if is_helpful { Self::Helpful } else { Self::NotHelpful }
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

pub fn validate_rating(field: &str, value: u8) -> Result<()> {
  if RATING_RANGE.contains(&value) {
    Ok(())
  } else {
    Err(Error::RatingOutOfRange { field: field.to_owned(), value })
  }
}

/// A category score of `0` is tolerated: aggregation treats it as unscored.
fn validate_category_ratings(map: &BTreeMap<Category, u8>) -> Result<()> {
  for (category, &score) in map {
    if score != 0 {
      validate_rating(category.as_ref(), score)?;
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rating_bounds() {
    assert!(NewReview::new(1, "a", 1).validate().is_ok());
    assert!(NewReview::new(1, "a", 5).validate().is_ok());

    let err = NewReview::new(1, "a", 6).validate().unwrap_err();
    assert!(matches!(err, Error::RatingOutOfRange { value: 6, .. }));
    assert!(NewReview::new(1, "a", 0).validate().is_err());
  }

  #[test]
  fn zero_category_score_is_tolerated() {
    let draft = NewReview::new(1, "a", 4).with_category(Category::Value, 0);
    assert!(draft.validate().is_ok());

    let draft = NewReview::new(1, "a", 4).with_category(Category::Value, 9);
    let err = draft.validate().unwrap_err();
    assert_eq!(err.to_string(), "value must be between 1 and 5, got 9");
  }

  #[test]
  fn votes_increment_the_matching_counter() {
    let mut review = Review::from_draft(1, Utc::now(), NewReview::new(1, "a", 3));
    review.record_vote(true.into());
    review.record_vote(Vote::Helpful);
    review.record_vote(false.into());
    assert_eq!((review.helpful, review.not_helpful), (2, 1));
  }

  #[test]
  fn vote_counters_saturate() {
    let mut review = Review::from_draft(1, Utc::now(), NewReview::new(1, "a", 3));
    review.helpful = u32::MAX;
    review.record_vote(Vote::Helpful);
    assert_eq!(review.helpful, u32::MAX);
  }

  #[test]
  fn patch_reports_rating_changes() {
    assert!(!ReviewPatch { title: Some("x".into()), ..Default::default() }
      .touches_ratings());
    assert!(ReviewPatch { rating: Some(2), ..Default::default() }.touches_ratings());
  }

  #[test]
  fn review_json_uses_host_field_names() {
    let json = r#"{
      "id": 1, "itemId": 1, "userName": "Sarah Johnson", "country": "USA",
      "rating": 5, "title": "t", "text": "x", "pros": "p", "cons": "c",
      "categoryRatings": {"cleanliness": 5, "value": 4},
      "date": "2025-08-15", "helpful": 24, "notHelpful": 2,
      "createdAt": "2025-08-15T10:00:00Z"
    }"#;
    let review: Review = serde_json::from_str(json).unwrap();
    assert_eq!(review.item_id, 1);
    assert_eq!(review.not_helpful, 2);
    assert_eq!(review.category_ratings[&Category::Value], 4);
    assert_eq!(review.date, NaiveDate::from_ymd_opt(2025, 8, 15).unwrap());
  }
}
