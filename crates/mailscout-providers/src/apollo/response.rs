//! Apollo request and response shapes, plus the pure mapping to [`Outcome`].

use mailscout_core::{EnrichmentSuccess, ErrorKind, Outcome, PersonInput, ProviderId};
use serde::{Deserialize, Serialize};

use crate::shape::null_as_default;

/// One entry of a `people/match` body, or of `details[]` in `people/bulk_match`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) struct MatchDetails {
    pub linkedin_url: String,
    pub reveal_personal_emails: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl MatchDetails {
    pub(crate) fn from_person(person: &PersonInput) -> Self {
        let (first_name, last_name) = person.name_parts();
        Self {
            linkedin_url: person.linkedin_url.clone(),
            reveal_personal_emails: true,
            first_name,
            last_name,
            organization_name: person.company().map(ToOwned::to_owned),
            domain: person.domain().map(ToOwned::to_owned),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BulkMatchRequest {
    pub details: Vec<MatchDetails>,
    pub reveal_personal_emails: bool,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MatchResponse {
    #[serde(default)]
    pub person: Option<ApolloPerson>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BulkMatchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub matches: Vec<Option<ApolloPerson>>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct ApolloPerson {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub organization: Option<Organization>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct Organization {
    #[serde(default)]
    pub name: Option<String>,
}

fn no_match(linkedin_url: &str) -> Outcome {
    Outcome::failure(ErrorKind::NotFound, "No match found in Apollo", Some(linkedin_url))
}

/// Maps a matched person (or the lack of one) to an outcome.
pub(crate) fn parse_person(person: Option<ApolloPerson>, linkedin_url: &str) -> Outcome {
    let Some(person) = person else {
        return no_match(linkedin_url);
    };
    let profile_url = person
        .linkedin_url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| linkedin_url.to_owned());
    match EnrichmentSuccess::from_email(person.email, profile_url, ProviderId::Apollo) {
        Some(mut success) => {
            success.name = person.name;
            success.title = person.title;
            success.company = person.organization.and_then(|o| o.name);
            success.into()
        }
        None => Outcome::failure(
            ErrorKind::NotFound,
            "No email found in Apollo",
            Some(linkedin_url),
        ),
    }
}

pub(crate) fn parse_match(response: MatchResponse, linkedin_url: &str) -> Outcome {
    parse_person(response.person, linkedin_url)
}

/// Aligns `matches[i]` with `people[i]`. Missing or null slots are not-found.
pub(crate) fn parse_bulk_match(response: BulkMatchResponse, people: &[PersonInput]) -> Vec<Outcome> {
    let mut matches = response.matches.into_iter();
    people
        .iter()
        .map(|person| match matches.next().flatten() {
            Some(found) => parse_person(Some(found), &person.linkedin_url),
            None => no_match(&person.linkedin_url),
        })
        .collect()
}
