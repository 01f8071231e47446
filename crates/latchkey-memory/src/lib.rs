//! In-memory [`Provider`](latchkey_auth::Provider) backend for the
//! latchkey authorization server.
//!
//! Everything lives in process-local maps: the client registry, the scope
//! catalogue, grant codes with their lifecycle state, and issued tokens
//! with back-references to their originating grant. Intended for tests,
//! demos, and as a reference for real storage backends; nothing is
//! persisted.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use latchkey_auth::{AuthServer, Client};
//! use latchkey_memory::InMemoryProvider;
//!
//! let provider = Arc::new(
//!     InMemoryProvider::builder()
//!         .client(client, "s3cret")
//!         .scope("read", "Read your data")
//!         .authenticated(true)
//!         .build(),
//! );
//! let server = AuthServer::builder().provider(provider).build()?;
//! ```

mod provider;

pub use provider::{GrantStatus, InMemoryProvider, InMemoryProviderBuilder, TokenStatus};

/// A minimal consent-form template used when no custom form is supplied.
///
/// Echoes the request parameters through hidden inputs so a POST of the
/// form re-submits the same authorization request.
pub const DEFAULT_AUTHZ_FORM: &str = r#"<!doctype html>
<html>
<head><title>Authorize {{client_name}}</title></head>
<body>
<h1>{{client_name}} is requesting access to your account</h1>
<p>{{client_desc}}</p>
{{errors}}
<ul>{{scope_list}}</ul>
<form method="post" action="">
  <input type="hidden" name="client_id" value="{{client_id}}">
  <input type="hidden" name="redirect_uri" value="{{redirect_uri}}">
  <input type="hidden" name="response_type" value="{{response_type}}">
  <input type="hidden" name="state" value="{{state}}">
  <input type="hidden" name="scope" value="{{scopes}}">
  <button type="submit" name="decision" value="authorize">Authorize</button>
</form>
</body>
</html>
"#;
