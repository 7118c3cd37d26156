//! Core types and trait definitions for the Roster contact service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! permission-gated CRUD contract lives in [`service::ContactService`]; storage
//! backends implement [`store::ContactStore`].

// Native `async fn` in traits; the `Send` bounds are spelled out on the trait.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod permission;
pub mod service;
pub mod store;
pub mod user;

pub use error::{Error, Result};
pub use permission::Permission;
pub use service::ContactService;
