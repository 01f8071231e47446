//! OAuth 2.0 client registrations.

use serde::{Deserialize, Serialize};
use url::Url;

/// A registered third-party client application.
///
/// The registration is owned by the provider; the core only reads it. The
/// `redirect_uri` is the single canonical redirection URI the server is
/// willing to send the user-agent to, and it is matched byte-for-byte
/// against the `redirect_uri` request parameter (RFC 6749 section 3.1.2).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Stable client identifier issued at registration.
    pub id: String,

    /// Human-readable display name, shown on the consent form.
    pub name: String,

    /// Detailed description of the client application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Profile image shown on the consent form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_img_url: Option<Url>,

    /// Client homepage, linked from the consent form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage_url: Option<Url>,

    /// The registered redirection URI. Unique across the registry and
    /// immutable from the core's perspective.
    pub redirect_uri: Url,
}
