//! Typed client for the news admin API.

mod backend;
mod client;
mod credentials;
mod draft;
mod dto;
mod error;
mod record;

pub use backend::*;
pub use client::*;
pub use credentials::*;
pub use draft::*;
pub use error::*;
pub use record::*;
