//! Type resolution and generation pipeline for ormtype.
//!
//! This crate turns model metadata into resolved, writer-ready results.
//! Output writers for concrete formats live in their own crates
//! (e.g., `ormtype-codegen-typescript`).
//!
//! # Module Organization
//!
//! - [`adapters`] - Collaborator traits (discovery, introspection, extraction, formatting, writing)
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`resolver`] - Type resolver, enum builder and relation resolver
//! - [`snapshot`] - Collaborators backed by schema snapshot files
//! - [`pipeline`] - The generation pipeline with plugin hooks

pub mod adapters;
pub mod builder;
pub mod pipeline;
pub mod resolver;
pub mod snapshot;
