//! Domain types for the authorization server core.
//!
//! These are the pure values that cross the [`Provider`](crate::provider::Provider)
//! boundary: registered clients, scopes, grant codes, and tokens. All storage,
//! hashing, and randomness live behind the provider; the types here carry no
//! behavior beyond validation and wire formatting helpers.

pub mod client;
pub mod scope;
pub mod token;

pub use client::Client;
pub use scope::Scope;
pub use token::{DEFAULT_ACCESS_TOKEN_TTL, GrantCode, Token, TokenKind};
