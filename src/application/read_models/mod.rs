//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of comparison data for the
//! table formatters and chart renderers.

mod comparison_read_model;
mod comparison_read_model_builder;
mod repository_detail_view;

pub use comparison_read_model::{ComparisonReadModel, TypeDistributionRow};
pub use comparison_read_model_builder::ComparisonReadModelBuilder;
pub use repository_detail_view::{RepositoryDetailView, RepositoryRowView};
