//! Subcommand definitions and their dispatch onto a [`Catalog`].

use anyhow::{Context as _, anyhow};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use revue_core::{
  catalog::Catalog,
  category::Category,
  item::{ItemPatch, NewItem},
  review::{NewReview, ReviewPatch, Vote},
};
use serde_json::{Value, json};

// ─── Command tree ─────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum Command {
  /// List every item.
  Items,
  /// Manage a single item.
  #[command(subcommand)]
  Item(ItemCommand),
  /// List the reviews of an item.
  Reviews { item_id: u64 },
  /// Manage a single review.
  #[command(subcommand)]
  Review(ReviewCommand),
  /// Re-derive an item's rating fields from its reviews.
  Recompute { item_id: u64 },
  /// Restore the default catalog and reviews, discarding all changes.
  Reset,
}

#[derive(Subcommand, Debug)]
pub enum ItemCommand {
  Show { id: u64 },
  Add(ItemFields),
  Update {
    id:     u64,
    #[command(flatten)]
    fields: ItemFields,
  },
  Delete { id: u64 },
}

#[derive(Args, Debug, Default)]
pub struct ItemFields {
  #[arg(long)]
  pub name:             Option<String>,
  #[arg(long)]
  pub category:         Option<String>,
  #[arg(long)]
  pub location:         Option<String>,
  #[arg(long)]
  pub image:            Option<String>,
  #[arg(long)]
  pub location_details: Option<String>,
  /// May be repeated; replaces the whole amenity list on update.
  #[arg(long = "amenity")]
  pub amenities:        Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommand {
  Add {
    item_id: u64,
    #[arg(long)]
    user:    String,
    #[arg(long)]
    rating:  u8,
    #[command(flatten)]
    fields:  ReviewFields,
  },
  Update {
    id:     u64,
    #[arg(long)]
    user:   Option<String>,
    #[arg(long)]
    rating: Option<u8>,
    #[command(flatten)]
    fields: ReviewFields,
  },
  Delete { id: u64 },
  /// Record a helpfulness vote.
  Vote {
    id:          u64,
    #[arg(long)]
    not_helpful: bool,
  },
}

#[derive(Args, Debug, Default)]
pub struct ReviewFields {
  #[arg(long)]
  pub country:    Option<String>,
  #[arg(long)]
  pub title:      Option<String>,
  #[arg(long)]
  pub text:       Option<String>,
  #[arg(long)]
  pub pros:       Option<String>,
  #[arg(long)]
  pub cons:       Option<String>,
  /// Stay date, `YYYY-MM-DD`.
  #[arg(long)]
  pub date:       Option<NaiveDate>,
  /// A category score such as `cleanliness=4`. May be repeated.
  #[arg(long = "category", value_parser = parse_category_score)]
  pub categories: Vec<(Category, u8)>,
}

fn parse_category_score(s: &str) -> Result<(Category, u8), String> {
  let (name, score) = s
    .split_once('=')
    .ok_or_else(|| format!("expected CATEGORY=SCORE, got {s:?}"))?;
  let category = name
    .trim()
    .parse::<Category>()
    .map_err(|_| format!("unknown category {name:?}"))?;
  let score = score
    .trim()
    .parse::<u8>()
    .map_err(|e| format!("invalid score {score:?}: {e}"))?;
  Ok((category, score))
}

// ─── Field conversion ─────────────────────────────────────────────────────────

impl ItemFields {
  fn into_draft(self) -> anyhow::Result<NewItem> {
    let mut draft = NewItem::new(
      self.name.context("--name is required")?,
      self.category.context("--category is required")?,
      self.location.context("--location is required")?,
    );
    draft.image = self.image;
    draft.location_details = self.location_details;
    draft.amenities = self.amenities;
    Ok(draft)
  }

  fn into_patch(self) -> ItemPatch {
    ItemPatch {
      name: self.name,
      category: self.category,
      location: self.location,
      image: self.image,
      location_details: self.location_details,
      amenities: (!self.amenities.is_empty()).then_some(self.amenities),
      ..ItemPatch::default()
    }
  }
}

impl ReviewFields {
  fn into_draft(self, item_id: u64, user: String, rating: u8) -> NewReview {
    let mut draft = NewReview::new(item_id, user, rating);
    draft.country = self.country.unwrap_or_default();
    draft.title = self.title.unwrap_or_default();
    draft.text = self.text.unwrap_or_default();
    draft.pros = self.pros.unwrap_or_default();
    draft.cons = self.cons.unwrap_or_default();
    if let Some(date) = self.date {
      draft.date = date;
    }
    draft.category_ratings = self.categories.into_iter().collect();
    draft
  }

  fn into_patch(self, user: Option<String>, rating: Option<u8>) -> ReviewPatch {
    ReviewPatch {
      user_name: user,
      country: self.country,
      rating,
      title: self.title,
      text: self.text,
      pros: self.pros,
      cons: self.cons,
      category_ratings: (!self.categories.is_empty())
        .then(|| self.categories.into_iter().collect()),
      date: self.date,
    }
  }
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

/// Run `command` against `catalog` and return the JSON to print.
pub fn run<C: Catalog>(catalog: &mut C, command: Command) -> anyhow::Result<Value> {
  let output = match command {
    Command::Items => serde_json::to_value(catalog.list_items()?)?,
    Command::Item(cmd) => run_item(catalog, cmd)?,
    Command::Reviews { item_id } => {
      serde_json::to_value(catalog.list_reviews_for_item(item_id)?)?
    }
    Command::Review(cmd) => run_review(catalog, cmd)?,
    Command::Recompute { item_id } => {
      let item = catalog
        .recompute(item_id)?
        .ok_or_else(|| anyhow!("item {item_id} not found"))?;
      serde_json::to_value(item)?
    }
    Command::Reset => {
      catalog.reset_to_defaults()?;
      json!({ "reset": true })
    }
  };
  Ok(output)
}

fn run_item<C: Catalog>(catalog: &mut C, cmd: ItemCommand) -> anyhow::Result<Value> {
  let value = match cmd {
    ItemCommand::Show { id } => {
      let item = catalog
        .get_item(id)?
        .ok_or_else(|| anyhow!("item {id} not found"))?;
      serde_json::to_value(item)?
    }
    ItemCommand::Add(fields) => serde_json::to_value(catalog.create_item(fields.into_draft()?)?)?,
    ItemCommand::Update { id, fields } => {
      let item = catalog
        .update_item(id, fields.into_patch())?
        .ok_or_else(|| anyhow!("item {id} not found"))?;
      serde_json::to_value(item)?
    }
    ItemCommand::Delete { id } => {
      catalog.delete_item(id)?;
      json!({ "deleted": id })
    }
  };
  Ok(value)
}

fn run_review<C: Catalog>(catalog: &mut C, cmd: ReviewCommand) -> anyhow::Result<Value> {
  let value = match cmd {
    ReviewCommand::Add { item_id, user, rating, fields } => {
      let review = catalog.create_review(fields.into_draft(item_id, user, rating))?;
      serde_json::to_value(review)?
    }
    ReviewCommand::Update { id, user, rating, fields } => {
      let review = catalog
        .update_review(id, fields.into_patch(user, rating))?
        .ok_or_else(|| anyhow!("review {id} not found"))?;
      serde_json::to_value(review)?
    }
    ReviewCommand::Delete { id } => {
      let review = catalog
        .delete_review(id)?
        .ok_or_else(|| anyhow!("review {id} not found"))?;
      serde_json::to_value(review)?
    }
    ReviewCommand::Vote { id, not_helpful } => {
      let review = catalog
        .vote_helpful(id, Vote::from(!not_helpful))?
        .ok_or_else(|| anyhow!("review {id} not found"))?;
      serde_json::to_value(review)?
    }
  };
  Ok(value)
}
