//! # Catalog Admin
//!
//! The validated mutation pipeline behind the catalog's admin screens. Raw form input for a
//! category or product is sanitized, validated, checked for duplicates, written to the
//! in-process store, and followed by invalidation of every cached view that depended on it.
//!
//! ## Modules
//!
//! - [`model`]: [`Category`](model::Category), [`Product`](model::Product) and their payloads
//! - [`category_actor`] / [`product_actor`]: the two stores, built on [`store_actor`]
//! - [`clients`]: typed clients for each store
//! - [`sanitize`], [`form`], [`validation`]: untrusted input to validated payloads
//! - [`guard`]: case-insensitive duplicate names
//! - [`executor`]: the writes, with typed not-found and conflict outcomes
//! - [`revalidate`]: invalidation fan-out to the [`ViewCache`](revalidate::ViewCache)
//! - [`response`]: the `{status, message, error?}` contract
//! - [`actions`]: the caller-facing entry points
//! - [`config`], [`lifecycle`]: settings, startup and shutdown

pub mod actions;
pub mod category_actor;
pub mod clients;
pub mod config;
pub mod executor;
pub mod form;
pub mod guard;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
pub mod response;
pub mod revalidate;
pub mod sanitize;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
