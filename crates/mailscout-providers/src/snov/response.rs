use mailscout_core::{EnrichmentSuccess, ErrorKind, Outcome, ProviderId};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::shape::{first_non_blank, non_blank, null_as_default, EmailEntry};

#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StartRequest<'a> {
    pub urls: [&'a str; 1],
}

/// `task_hash` arrives either under `data` or at the top level.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StartResponse {
    #[serde(default)]
    pub data: Option<TaskRef>,
    #[serde(default)]
    pub task_hash: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TaskRef {
    #[serde(default)]
    pub task_hash: Option<String>,
}

impl StartResponse {
    pub(crate) fn into_task_hash(self) -> Option<String> {
        first_non_blank([self.data.and_then(|d| d.task_hash), self.task_hash])
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResultResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<ResultEntry>,
}

impl ResultResponse {
    pub(crate) fn is_completed(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("completed"))
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResultEntry {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub result: Option<SnovProfile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SnovProfile {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emails: Vec<EmailEntry>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub current_job: Option<CurrentJob>,
    #[serde(default)]
    pub social: Option<Social>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CurrentJob {
    One(Job),
    Many(Vec<Job>),
    Other(IgnoredAny),
}

impl CurrentJob {
    fn into_first(self) -> Option<Job> {
        match self {
            CurrentJob::One(job) => Some(job),
            CurrentJob::Many(jobs) => jobs.into_iter().next(),
            CurrentJob::Other(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Job {
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

/// Snov sends `social` as an object, or as an empty array when it has none.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Social {
    Links {
        #[serde(default)]
        linkedin: Option<String>,
    },
    Other(IgnoredAny),
}

fn no_match(linkedin_url: &str) -> Outcome {
    Outcome::failure(ErrorKind::NotFound, "No match found in Snov.io", Some(linkedin_url))
}

/// Picks the entry for `linkedin_url` (or the only one) out of a completed task.
pub(crate) fn parse_result(response: ResultResponse, linkedin_url: &str) -> Outcome {
    let wanted = linkedin_url.trim_end_matches('/');
    let mut entries = response.data;
    let index = entries
        .iter()
        .position(|e| {
            e.url
                .as_deref()
                .is_some_and(|u| u.trim_end_matches('/').eq_ignore_ascii_case(wanted))
        })
        .unwrap_or(0);
    if index >= entries.len() {
        return no_match(linkedin_url);
    }
    match entries.swap_remove(index).result {
        Some(profile) => parse_profile(profile, linkedin_url),
        None => no_match(linkedin_url),
    }
}

pub(crate) fn parse_profile(profile: SnovProfile, linkedin_url: &str) -> Outcome {
    if profile.success == Some(false) {
        return no_match(linkedin_url);
    }

    let listed = profile.emails.into_iter().find_map(EmailEntry::into_email);
    let email = first_non_blank([profile.email, listed]);
    let profile_url = match profile.social {
        Some(Social::Links { linkedin }) => non_blank(linkedin),
        _ => None,
    }
    .unwrap_or_else(|| linkedin_url.to_owned());

    let Some(mut success) = EnrichmentSuccess::from_email(email, profile_url, ProviderId::Snov)
    else {
        return Outcome::failure(
            ErrorKind::NotFound,
            "No email found in Snov.io",
            Some(linkedin_url),
        );
    };

    let joined = [profile.first_name, profile.last_name]
        .into_iter()
        .filter_map(non_blank)
        .collect::<Vec<_>>()
        .join(" ");
    success.name = first_non_blank([Some(joined), profile.name]);
    if let Some(job) = profile.current_job.and_then(CurrentJob::into_first) {
        success.title = non_blank(job.position);
        success.company = non_blank(job.company_name);
    }
    success.into()
}
