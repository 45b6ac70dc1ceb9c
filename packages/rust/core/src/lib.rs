//! Word-list pipelines and domain logic for fivelist.
//!
//! This crate ties together the source download, candidate filtering, list
//! file I/O, and the Bloom-filter data generator into the three workflows
//! the CLI exposes: [`generate`], [`reconcile`], and [`embed`].

pub mod bloom;
pub mod embed;
pub mod filter;
pub mod generate;
pub mod lists;
pub mod reconcile;
