//! Core library for the CuratedCrafts storefront.
//!
//! Catalog fetching, the shop filter/sort pipeline, the cart store and the
//! scripted support chat. Everything except the catalog client is pure,
//! in-memory and synchronous.

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
