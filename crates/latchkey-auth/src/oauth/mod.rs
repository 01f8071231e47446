//! OAuth 2.0 protocol types and request validation.
//!
//! - [`authorize`]: authorization endpoint parameters, the fixed-order
//!   validator, and the query/fragment response builders
//! - [`token`]: token endpoint request and response wire types
//!
//! The HTTP handlers in [`crate::http`] orchestrate these pieces; nothing
//! in this module touches persistent state.

pub mod authorize;
pub mod token;

pub use authorize::{
    AuthorizationRequest, AuthorizationResponse, AuthzParams, ErrorChannel, ImplicitResponse,
    Rejection, ResponseType, validate,
};
pub use token::{TokenRequest, TokenResponse};
