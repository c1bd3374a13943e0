//! Canonical result of one enrichment attempt.
//!
//! Every provider response, every transport problem, and every engine-level
//! decision ends up as an [`Outcome`]. On the wire the two variants are told
//! apart by a boolean `success` field:
//!
//! ```json
//! {"success": true,  "email": "...", "linkedin_url": "...", "source": "apollo", ...}
//! {"success": false, "error": "not_found", "message": "...", "linkedin_url": "..."}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::provider::ProviderId;

/// Failure taxonomy shared by all providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Provider was reached but had no match, or no email on file.
    #[serde(rename = "not_found")]
    NotFound,
    /// Provider signaled quota exhaustion.
    #[serde(rename = "rate_limit")]
    RateLimited,
    /// Credential rejected by the provider, or malformed.
    #[serde(rename = "auth_error")]
    AuthError,
    /// Provider unreachable, timed out, or answered with an unexpected status or shape.
    #[serde(rename = "api_error")]
    UpstreamError,
    /// Caller input rejected before any provider was contacted.
    #[serde(rename = "validation_error")]
    ValidationError,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimited => "rate_limit",
            ErrorKind::AuthError => "auth_error",
            ErrorKind::UpstreamError => "api_error",
            ErrorKind::ValidationError => "validation_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentSuccess {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub linkedin_url: String,
    pub source: ProviderId,
}

impl EnrichmentSuccess {
    /// Builds a success, or `None` when `email` is blank.
    ///
    /// Parsers go through this so a success can never carry an empty email.
    #[must_use]
    pub fn from_email(
        email: Option<String>,
        linkedin_url: impl Into<String>,
        source: ProviderId,
    ) -> Option<Self> {
        let email = email.map(|e| e.trim().to_owned()).filter(|e| !e.is_empty())?;
        Some(Self {
            email,
            name: None,
            title: None,
            company: None,
            linkedin_url: linkedin_url.into(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentFailure {
    pub error: ErrorKind,
    pub message: String,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

impl EnrichmentFailure {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>, linkedin_url: Option<&str>) -> Self {
        Self {
            error: kind,
            message: message.into(),
            linkedin_url: linkedin_url.map(ToOwned::to_owned),
        }
    }
}

/// Either a found email or a structured failure. Never both, never neither.
///
/// Reading one back honors the `success` flag: a body tagged `false` is
/// always a failure, whatever other fields it carries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "WireOutcome")]
pub enum Outcome {
    Success(EnrichmentSuccess),
    Failure(EnrichmentFailure),
}

impl Outcome {
    #[must_use]
    pub fn failure(kind: ErrorKind, message: impl Into<String>, linkedin_url: Option<&str>) -> Self {
        Outcome::Failure(EnrichmentFailure::new(kind, message, linkedin_url))
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    #[must_use]
    pub fn as_failure(&self) -> Option<&EnrichmentFailure> {
        match self {
            Outcome::Failure(f) => Some(f),
            Outcome::Success(_) => None,
        }
    }

    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.as_failure().map(|f| f.error)
    }
}

impl From<EnrichmentSuccess> for Outcome {
    fn from(value: EnrichmentSuccess) -> Self {
        Outcome::Success(value)
    }
}

impl From<EnrichmentFailure> for Outcome {
    fn from(value: EnrichmentFailure) -> Self {
        Outcome::Failure(value)
    }
}

/// Flat read-side view of either variant.
#[derive(Deserialize)]
struct WireOutcome {
    success: bool,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    linkedin_url: Option<String>,
    #[serde(default)]
    source: Option<ProviderId>,
    #[serde(default)]
    error: Option<ErrorKind>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Error)]
#[error("outcome with success={success} is missing `{field}`")]
struct MissingField {
    success: bool,
    field: &'static str,
}

impl TryFrom<WireOutcome> for Outcome {
    type Error = MissingField;

    fn try_from(wire: WireOutcome) -> Result<Self, Self::Error> {
        let success = wire.success;
        let missing = move |field: &'static str| MissingField { success, field };
        if !wire.success {
            return Ok(Outcome::Failure(EnrichmentFailure {
                error: wire.error.ok_or_else(|| missing("error"))?,
                message: wire.message.ok_or_else(|| missing("message"))?,
                linkedin_url: wire.linkedin_url,
            }));
        }
        Ok(Outcome::Success(EnrichmentSuccess {
            email: wire.email.ok_or_else(|| missing("email"))?,
            linkedin_url: wire.linkedin_url.ok_or_else(|| missing("linkedin_url"))?,
            source: wire.source.ok_or_else(|| missing("source"))?,
            name: wire.name,
            title: wire.title,
            company: wire.company,
        }))
    }
}

#[derive(Serialize)]
struct Tagged<'a, T: Serialize> {
    success: bool,
    #[serde(flatten)]
    body: &'a T,
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Success(body) => Tagged {
                success: true,
                body,
            }
            .serialize(serializer),
            Outcome::Failure(body) => Tagged {
                success: false,
                body,
            }
            .serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_email_rejects_blank_email() {
        assert!(EnrichmentSuccess::from_email(None, "u", ProviderId::Apollo).is_none());
        assert!(EnrichmentSuccess::from_email(Some("  ".to_string()), "u", ProviderId::Apollo).is_none());
        let success = EnrichmentSuccess::from_email(Some(" jane@acme.io ".to_string()), "u", ProviderId::Lusha)
            .expect("non-blank email");
        assert_eq!(success.email, "jane@acme.io");
        assert_eq!(success.source, ProviderId::Lusha);
    }

    #[test]
    fn success_serializes_with_true_tag() {
        let outcome = Outcome::Success(EnrichmentSuccess {
            email: "jane@acme.io".to_string(),
            name: Some("Jane Doe".to_string()),
            title: None,
            company: Some("Acme".to_string()),
            linkedin_url: "https://linkedin.com/in/jdoe".to_string(),
            source: ProviderId::RocketReach,
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["email"], "jane@acme.io");
        assert_eq!(json["source"], "rocketreach");
        assert!(json["title"].is_null());
    }

    #[test]
    fn failure_serializes_with_wire_error_codes() {
        let outcome = Outcome::failure(
            ErrorKind::UpstreamError,
            "Apollo request timed out",
            Some("https://linkedin.com/in/jdoe"),
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "api_error");
        assert_eq!(json["message"], "Apollo request timed out");

        let limited = serde_json::to_value(Outcome::failure(ErrorKind::RateLimited, "x", None)).unwrap();
        assert_eq!(limited["error"], "rate_limit");
        assert!(limited["linkedin_url"].is_null());
    }

    #[test]
    fn outcome_deserializes_both_variants() {
        let ok: Outcome = serde_json::from_str(
            r#"{"success": true, "email": "a@b.co", "linkedin_url": "u", "source": "snov"}"#,
        )
        .unwrap();
        assert!(ok.is_success());

        let failed: Outcome = serde_json::from_str(
            r#"{"success": false, "error": "auth_error", "message": "Invalid Lusha API key"}"#,
        )
        .unwrap();
        assert_eq!(failed.error_kind(), Some(ErrorKind::AuthError));
    }

    #[test]
    fn false_tag_never_reads_back_as_success() {
        let body = r#"{"success": false, "email": "a@b.co", "linkedin_url": "u", "source": "snov"}"#;
        assert!(serde_json::from_str::<Outcome>(body).is_err());

        let tagged: Outcome = serde_json::from_str(
            r#"{"success": false, "email": "a@b.co", "error": "not_found", "message": "m", "linkedin_url": "u"}"#,
        )
        .unwrap();
        assert_eq!(tagged.error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(tagged.as_failure().and_then(|f| f.linkedin_url.as_deref()), Some("u"));
    }

    #[test]
    fn outcome_round_trips_through_json() {
        let outcome = Outcome::failure(ErrorKind::RateLimited, "Lusha rate limit exceeded", Some("u"));
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(serde_json::from_str::<Outcome>(&json).unwrap(), outcome);
    }

    #[test]
    fn error_kind_display_matches_wire_name() {
        for kind in [
            ErrorKind::NotFound,
            ErrorKind::RateLimited,
            ErrorKind::AuthError,
            ErrorKind::UpstreamError,
            ErrorKind::ValidationError,
        ] {
            let wire = serde_json::to_value(kind).unwrap();
            assert_eq!(wire, kind.to_string());
        }
    }
}
