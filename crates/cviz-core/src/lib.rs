#![forbid(unsafe_code)]

//! Core contracts for chatviz widgets.
//!
//! # Role in chatviz
//! `cviz-core` holds the vocabulary every other crate shares: cell geometry,
//! canonical input events, and the two host-facing contracts the interaction
//! layer is written against:
//!
//! - [`surface::ScrollSurface`]: a live, horizontally scrollable strip that can
//!   be measured and asked to scroll.
//! - [`page::Page`]: the ambient document that owns page scrolling and
//!   keyboard listeners.
//!
//! Both hand out [`observe::Subscription`] guards so listener lifetimes are
//! tied to Rust scopes instead of manual bookkeeping.

pub mod event;
pub mod geometry;
pub mod observe;
pub mod page;
pub mod surface;
