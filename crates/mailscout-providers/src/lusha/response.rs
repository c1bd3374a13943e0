use mailscout_core::{EnrichmentSuccess, ErrorKind, Outcome, ProviderId};
use serde::Deserialize;

use crate::shape::{first_non_blank, non_blank, null_as_default, Named};

/// `v2/person` answers either with the profile at the top level or wrapped
/// in `data`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PersonResponse {
    Wrapped { data: LushaPerson },
    Bare(LushaPerson),
}

impl PersonResponse {
    fn into_person(self) -> LushaPerson {
        match self {
            PersonResponse::Wrapped { data } | PersonResponse::Bare(data) => data,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LushaPerson {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<Named>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email_addresses: Vec<EmailAddress>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EmailAddress {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

fn pick_email(addresses: Vec<EmailAddress>) -> Option<String> {
    let work = addresses
        .iter()
        .find(|a| a.kind.as_deref() == Some("work"))
        .and_then(|a| non_blank(a.email.clone()));
    work.or_else(|| addresses.into_iter().next().and_then(|a| non_blank(a.email)))
}

/// Lusha does not echo a profile URL, so successes carry the input one.
pub(crate) fn parse_person(response: PersonResponse, linkedin_url: &str) -> Outcome {
    let person = response.into_person();
    let email = pick_email(person.email_addresses);
    let Some(mut success) = EnrichmentSuccess::from_email(email, linkedin_url, ProviderId::Lusha)
    else {
        return Outcome::failure(ErrorKind::NotFound, "No email found in Lusha", Some(linkedin_url));
    };

    let joined = [person.first_name, person.last_name]
        .into_iter()
        .filter_map(non_blank)
        .collect::<Vec<_>>()
        .join(" ");
    success.name = first_non_blank([person.full_name, Some(joined)]);
    success.title = person.job_title;
    success.company = person.company.and_then(Named::into_name);
    success.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://www.linkedin.com/in/jane-doe";

    fn parse(value: serde_json::Value) -> Outcome {
        parse_person(serde_json::from_value(value).expect("fixture"), URL)
    }

    #[test]
    fn wrapped_profile_prefers_work_email() {
        let outcome = parse(json!({
            "data": {
                "firstName": "Jane",
                "lastName": "Doe",
                "jobTitle": "Head of Sales",
                "company": { "name": "Acme", "domain": "acme.io" },
                "emailAddresses": [
                    { "email": "jane@gmail.com", "type": "personal" },
                    { "email": "jane@acme.io", "type": "work" }
                ]
            }
        }));
        let Outcome::Success(success) = outcome else {
            panic!("expected success");
        };
        assert_eq!(success.email, "jane@acme.io");
        assert_eq!(success.name.as_deref(), Some("Jane Doe"));
        assert_eq!(success.company.as_deref(), Some("Acme"));
        assert_eq!(success.title.as_deref(), Some("Head of Sales"));
        assert_eq!(success.linkedin_url, URL);
    }

    #[test]
    fn bare_profile_falls_back_to_first_email_and_string_company() {
        let outcome = parse(json!({
            "fullName": "Jane Q. Doe",
            "company": "Acme",
            "emailAddresses": [ { "email": "jane@gmail.com", "type": "personal" } ]
        }));
        let Outcome::Success(success) = outcome else {
            panic!("expected success");
        };
        assert_eq!(success.email, "jane@gmail.com");
        assert_eq!(success.name.as_deref(), Some("Jane Q. Doe"));
        assert_eq!(success.company.as_deref(), Some("Acme"));
    }

    #[test]
    fn missing_email_addresses_is_not_found() {
        let outcome = parse(json!({ "data": { "fullName": "Jane Doe" } }));
        assert_eq!(
            outcome.as_failure().map(|f| f.message.as_str()),
            Some("No email found in Lusha")
        );
    }
    #[test]
    fn null_email_addresses_inside_wrapper_is_not_found() {
        let outcome = parse(json!({
            "data": { "fullName": "Jane Doe", "emailAddresses": null }
        }));
        assert_eq!(
            outcome.as_failure().map(|f| f.message.as_str()),
            Some("No email found in Lusha")
        );
    }
}
