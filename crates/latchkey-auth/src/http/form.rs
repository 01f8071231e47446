//! Consent-form template compilation and rendering.
//!
//! The form's HTML is supplied from outside the core as a template string
//! and compiled exactly once at startup; requests render against the
//! shared, read-only compiled form. The template language is a flat set of
//! `{{placeholder}}` substitutions over [`AuthzData`]; an unknown
//! placeholder is a startup error, not a runtime one.
//!
//! Supported placeholders:
//!
//! | placeholder | value |
//! |---|---|
//! | `{{client_id}}` | client identifier |
//! | `{{client_name}}` | client display name |
//! | `{{client_desc}}` | client description |
//! | `{{client_uri}}` | client homepage URL |
//! | `{{client_img}}` | client profile image URL |
//! | `{{redirect_uri}}` | validated redirect URI |
//! | `{{response_type}}` | `code` or `token` |
//! | `{{state}}` | client state, echoed |
//! | `{{scopes}}` | scope ids, space-separated |
//! | `{{scope_list}}` | `<li>` items with scope descriptions |
//! | `{{errors}}` | rendered error blocks |
//!
//! Every substituted value is HTML-escaped.

use crate::error::AuthzError;
use crate::oauth::authorize::{AuthorizationRequest, ResponseType};
use crate::types::{Client, Scope, scope};

/// Data the consent form is rendered from.
///
/// Mirrors what the resource owner needs to make a decision: who is
/// asking, for which scopes, plus any displayable errors. `client` is
/// absent when validation failed before a client was resolved.
#[derive(Debug, Clone, Default)]
pub struct AuthzData {
    /// Client information, when known.
    pub client: Option<Client>,

    /// Requested scopes with their human descriptions.
    pub scopes: Vec<Scope>,

    /// Errors to display to the resource owner.
    pub errors: Vec<AuthzError>,

    /// Grant flavor of the request.
    pub response_type: Option<ResponseType>,

    /// Client state to echo through the form submission.
    pub state: String,

    /// Validated redirect URI, echoed through the form submission.
    pub redirect_uri: Option<String>,
}

impl AuthzData {
    /// Builds form data from a validated authorization request.
    #[must_use]
    pub fn from_request(request: &AuthorizationRequest) -> Self {
        Self {
            client: Some(request.client.clone()),
            scopes: request.scopes.clone(),
            errors: Vec::new(),
            response_type: Some(request.response_type),
            state: request.state.clone(),
            redirect_uri: Some(request.redirect_uri.to_string()),
        }
    }

    /// Builds form data that only displays errors.
    #[must_use]
    pub fn from_errors(errors: Vec<AuthzError>) -> Self {
        Self {
            errors,
            ..Self::default()
        }
    }
}

/// Template compilation errors. Surfacing at startup, never per-request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The template string is empty or whitespace.
    #[error("authorization form template is empty")]
    EmptyTemplate,

    /// A `{{` without a matching `}}`.
    #[error("unterminated placeholder in authorization form template")]
    UnterminatedPlaceholder,

    /// A placeholder name outside the supported set.
    #[error("unknown placeholder in authorization form template: {name:?}")]
    UnknownPlaceholder {
        /// The unrecognized name.
        name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    ClientId,
    ClientName,
    ClientDesc,
    ClientUri,
    ClientImg,
    RedirectUri,
    ResponseType,
    State,
    Scopes,
    ScopeList,
    Errors,
}

impl Placeholder {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "client_id" => Some(Self::ClientId),
            "client_name" => Some(Self::ClientName),
            "client_desc" => Some(Self::ClientDesc),
            "client_uri" => Some(Self::ClientUri),
            "client_img" => Some(Self::ClientImg),
            "redirect_uri" => Some(Self::RedirectUri),
            "response_type" => Some(Self::ResponseType),
            "state" => Some(Self::State),
            "scopes" => Some(Self::Scopes),
            "scope_list" => Some(Self::ScopeList),
            "errors" => Some(Self::Errors),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A compiled consent-form template, shared read-only across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthzForm {
    segments: Vec<Segment>,
}

impl AuthzForm {
    /// Compiles a template string.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] for an empty template, an unterminated
    /// `{{`, or an unknown placeholder name.
    pub fn compile(template: &str) -> Result<Self, FormError> {
        if template.trim().is_empty() {
            return Err(FormError::EmptyTemplate);
        }

        let mut segments = Vec::new();
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            let Some(len) = rest[start + 2..].find("}}") else {
                return Err(FormError::UnterminatedPlaceholder);
            };
            let name = rest[start + 2..start + 2 + len].trim();
            let placeholder =
                Placeholder::parse(name).ok_or_else(|| FormError::UnknownPlaceholder {
                    name: name.to_string(),
                })?;

            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            segments.push(Segment::Placeholder(placeholder));
            rest = &rest[start + 2 + len + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Renders the form for the given data.
    #[must_use]
    pub fn render(&self, data: &AuthzData) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(p) => out.push_str(&self.value_of(*p, data)),
            }
        }
        out
    }

    fn value_of(&self, placeholder: Placeholder, data: &AuthzData) -> String {
        let client = data.client.as_ref();
        match placeholder {
            Placeholder::ClientId => escape_html(client.map(|c| c.id.as_str()).unwrap_or_default()),
            Placeholder::ClientName => {
                escape_html(client.map(|c| c.name.as_str()).unwrap_or_default())
            }
            Placeholder::ClientDesc => escape_html(
                client
                    .and_then(|c| c.description.as_deref())
                    .unwrap_or_default(),
            ),
            Placeholder::ClientUri => escape_html(
                &client
                    .and_then(|c| c.homepage_url.as_ref())
                    .map(|u| u.to_string())
                    .unwrap_or_default(),
            ),
            Placeholder::ClientImg => escape_html(
                &client
                    .and_then(|c| c.profile_img_url.as_ref())
                    .map(|u| u.to_string())
                    .unwrap_or_default(),
            ),
            Placeholder::RedirectUri => {
                escape_html(data.redirect_uri.as_deref().unwrap_or_default())
            }
            Placeholder::ResponseType => data
                .response_type
                .map(|rt| rt.as_str().to_string())
                .unwrap_or_default(),
            Placeholder::State => escape_html(&data.state),
            Placeholder::Scopes => escape_html(&scope::stringify(&data.scopes)),
            Placeholder::ScopeList => data
                .scopes
                .iter()
                .map(|s| {
                    format!(
                        "<li><code>{}</code>: {}</li>",
                        escape_html(&s.id),
                        escape_html(&s.description)
                    )
                })
                .collect(),
            Placeholder::Errors => data
                .errors
                .iter()
                .map(|e| {
                    format!(
                        "<div class=\"authz-error\"><strong>{}</strong>: {}</div>",
                        escape_html(e.error.as_str()),
                        escape_html(e.error_description.as_deref().unwrap_or_default())
                    )
                })
                .collect(),
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
