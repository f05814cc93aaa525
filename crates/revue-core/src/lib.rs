//! Core types and trait definitions for the revue review catalog.
//!
//! This crate knows nothing about where records are kept. It defines the
//! records themselves, the math that derives an item's rating fields from its
//! reviews, and the [`catalog::Catalog`] contract that storage backends
//! implement.

pub mod aggregate;
pub mod catalog;
pub mod category;
pub mod error;
pub mod item;
pub mod review;

pub use error::{Error, Result};
