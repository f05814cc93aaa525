//! Rating categories — the fixed sub-dimensions a review may score.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// A per-dimension sub-rating. Declaration order is the canonical order used
/// when aggregating and when serialising rating maps.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
  Cleanliness,
  Service,
  Location,
  Value,
  Facilities,
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn iterates_in_fixed_order() {
    let all: Vec<_> = Category::iter().map(|c| c.to_string()).collect();
    assert_eq!(
      all,
      ["cleanliness", "service", "location", "value", "facilities"]
    );
  }

  #[test]
  fn parses_case_insensitively() {
    assert_eq!("Service".parse::<Category>().unwrap(), Category::Service);
    assert!("comfort".parse::<Category>().is_err());
  }

  #[test]
  fn map_keys_serialise_as_lowercase_strings() {
    let map = BTreeMap::from([(Category::Value, 4u8), (Category::Cleanliness, 5)]);
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"cleanliness":5,"value":4}"#);

    let back: BTreeMap<Category, u8> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
  }
}
