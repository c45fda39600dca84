//! # folio-core
//!
//! Shared domain types for the folio portfolio backend.
//!
//! - **Contact**: [`contact::ContactSubmission`] form payload, validated into
//!   [`contact::ContactMessage`] entries held by the in-memory [`contact::Inbox`]
//! - **Stats**: [`stats::PortfolioStats`] aggregate served by the stats endpoint
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by the server and the binary.

#![deny(unsafe_code)]

pub mod contact;
pub mod stats;
