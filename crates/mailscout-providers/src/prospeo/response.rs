use mailscout_core::{EnrichmentSuccess, ErrorKind, Outcome, ProviderId};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::shape::{first_non_blank, non_blank, Named};

#[derive(Debug, Serialize)]
pub(crate) struct EnrichRequest<'a> {
    pub data: EnrichData<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EnrichData<'a> {
    pub linkedin_url: &'a str,
}

/// Body of `enrich-person`.
///
/// Current responses nest the profile under `person`; older ones used
/// `response` or put the fields at the top level.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EnrichResponse {
    #[serde(default)]
    pub error: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub person: Option<ProspeoProfile>,
    #[serde(default)]
    pub response: Option<ProspeoProfile>,
    #[serde(default)]
    pub company: Option<Named>,
    #[serde(flatten)]
    pub top_level: ProspeoProfile,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProspeoProfile {
    #[serde(default)]
    pub email: Option<ProspeoEmail>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub current_job_title: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub company: Option<Named>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

/// A plain address, or a reveal record that only counts once verified or revealed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProspeoEmail {
    Text(String),
    Record {
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        status: Option<String>,
        #[serde(default)]
        revealed: Option<bool>,
    },
    Other(IgnoredAny),
}

impl ProspeoEmail {
    fn into_usable(self) -> Option<String> {
        match self {
            ProspeoEmail::Text(email) => non_blank(Some(email)),
            ProspeoEmail::Record {
                email,
                status,
                revealed,
            } if status.as_deref() == Some("VERIFIED") || revealed == Some(true) => {
                non_blank(email)
            }
            ProspeoEmail::Record { .. } | ProspeoEmail::Other(_) => None,
        }
    }
}

pub(crate) fn parse_enrich(response: EnrichResponse, linkedin_url: &str) -> Outcome {
    if matches!(response.error, Some(serde_json::Value::Bool(true))) {
        let message = non_blank(response.message)
            .unwrap_or_else(|| "No match found in Prospeo".to_owned());
        return Outcome::failure(ErrorKind::NotFound, message, Some(linkedin_url));
    }

    let profile = response
        .person
        .or(response.response)
        .unwrap_or(response.top_level);
    let email = profile.email.and_then(ProspeoEmail::into_usable);
    let profile_url =
        first_non_blank([profile.linkedin_url]).unwrap_or_else(|| linkedin_url.to_owned());

    let Some(mut success) = EnrichmentSuccess::from_email(email, profile_url, ProviderId::Prospeo)
    else {
        return Outcome::failure(
            ErrorKind::NotFound,
            "No email found in Prospeo",
            Some(linkedin_url),
        );
    };
    success.name = first_non_blank([profile.full_name, profile.name]);
    success.title = first_non_blank([profile.current_job_title, profile.title, profile.headline]);
    success.company = response
        .company
        .and_then(Named::into_name)
        .or_else(|| profile.company.and_then(Named::into_name));
    success.into()
}
