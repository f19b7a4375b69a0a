#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for metric-harvest
//!
//! This library consolidates all functionality for the metric-harvest tool, which discovers
//! observability metric definitions in upstream projects and normalizes them into a single
//! catalog.
//!
//! # Module Organization
//!
//! - [`model`]: The uniform record types and their vocabularies
//! - [`context`]: Cancellation and deadlines for long-running work
//! - [`error`]: Error taxonomy shared by fetchers and adapters
//! - [`fetch`]: Reproducible on-disk repository snapshots
//! - [`extract`]: Structural extractors over source trees and spec files
//! - [`normalize`]: Inference heuristics, deduplication, and enrichment
//! - [`adapters`]: The adapter contract, the registry, and concrete adapters
//! - [`harvest`]: Orchestration across adapters
//! - [`commands`]: Command-line interface

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod adapters;
#[cfg(not(any(debug_assertions, test)))]
mod adapters;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod context;
#[cfg(not(any(debug_assertions, test)))]
mod context;

#[cfg(any(debug_assertions, test))]
pub mod error;
#[cfg(not(any(debug_assertions, test)))]
mod error;

#[cfg(any(debug_assertions, test))]
pub mod extract;
#[cfg(not(any(debug_assertions, test)))]
mod extract;

#[cfg(any(debug_assertions, test))]
pub mod fetch;
#[cfg(not(any(debug_assertions, test)))]
mod fetch;

#[cfg(any(debug_assertions, test))]
pub mod harvest;
#[cfg(not(any(debug_assertions, test)))]
mod harvest;

#[cfg(any(debug_assertions, test))]
pub mod model;
#[cfg(not(any(debug_assertions, test)))]
mod model;

#[cfg(any(debug_assertions, test))]
pub mod normalize;
#[cfg(not(any(debug_assertions, test)))]
mod normalize;

pub use crate::commands::{Host, run};
