//! Scopes and the RFC 6749 section 3.3 scope grammar.
//!
//! The scope catalogue itself is owned by the provider; this module only
//! carries the value type and the parsing helpers shared between the core
//! and provider implementations.

use serde::{Deserialize, Serialize};

/// A named permission, shown to the resource owner on the consent form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    /// Scope identifier as it appears on the wire.
    pub id: String,

    /// Human description of what the client gains access to.
    pub description: String,
}

impl Scope {
    /// Creates a new scope.
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
        }
    }
}

/// Joins a scope set into the space-separated wire form.
#[must_use]
pub fn stringify(scopes: &[Scope]) -> String {
    scopes
        .iter()
        .map(|s| s.id.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `true` if `token` is a valid scope-token per RFC 6749 section 3.3:
///
/// ```text
/// scope-token = 1*( %x21 / %x23-5B / %x5D-7E )
/// ```
///
/// This excludes spaces, control characters, `"` and `\`.
#[must_use]
pub fn is_valid_scope_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b == 0x21 || (0x23..=0x5B).contains(&b) || (0x5D..=0x7E).contains(&b))
}

/// Splits a raw space-separated scope string into individual scope names,
/// folding duplicates while preserving first-seen order.
///
/// # Errors
///
/// Returns the offending token if any token violates the section 3.3
/// grammar. Unknown-but-well-formed names are not an error here; dropping
/// them is the provider's job.
pub fn split_names(raw: &str) -> Result<Vec<&str>, InvalidScopeToken> {
    let mut names: Vec<&str> = Vec::new();
    for token in raw.split(' ').filter(|t| !t.is_empty()) {
        if !is_valid_scope_token(token) {
            return Err(InvalidScopeToken {
                token: token.to_string(),
            });
        }
        if !names.contains(&token) {
            names.push(token);
        }
    }
    Ok(names)
}

/// A scope token that violates the RFC 6749 section 3.3 grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed scope token: {token:?}")]
pub struct InvalidScopeToken {
    /// The offending token.
    pub token: String,
}
