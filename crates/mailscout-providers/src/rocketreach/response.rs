use mailscout_core::{EnrichmentSuccess, ErrorKind, Outcome, ProviderId};
use serde::Deserialize;

use crate::shape::{first_non_blank, null_as_default, EmailEntry};

/// Body of `person/lookup`. RocketReach returns the profile un-nested.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LookupResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub current_title: Option<String>,
    #[serde(default)]
    pub current_employer: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub current_work_email: Option<String>,
    #[serde(default)]
    pub personal_email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emails: Vec<EmailEntry>,
}

pub(crate) fn parse_lookup(response: LookupResponse, linkedin_url: &str) -> Outcome {
    let listed = response.emails.into_iter().next().and_then(EmailEntry::into_email);
    let email = first_non_blank([
        response.current_work_email,
        response.personal_email,
        listed,
    ]);
    let profile_url = first_non_blank([response.linkedin_url])
        .unwrap_or_else(|| linkedin_url.to_owned());

    match EnrichmentSuccess::from_email(email, profile_url, ProviderId::RocketReach) {
        Some(mut success) => {
            success.name = response.name;
            success.title = response.current_title;
            success.company = response.current_employer;
            success.into()
        }
        None => Outcome::failure(
            ErrorKind::NotFound,
            "No email found in RocketReach",
            Some(linkedin_url),
        ),
    }
}
