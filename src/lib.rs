//! Personalized supplement relevance scoring.
//!
//! [`scorer::calculate_relevance_score`] turns a static impact score, a
//! per-supplement [`types::matrix::RelevanceMatrix`] and a
//! [`types::context::UserRelevanceContext`] into a clamped 0-10 score with
//! a tier, reasons and warnings. The remaining modules load catalogs and
//! user snapshots from TOML and render ranked inventories.

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod inventory;
pub mod report;
pub mod scorer;
pub mod types;

pub use error::{Result, StackError};
pub use scorer::{calculate_relevance_score, RelevanceScorer};
