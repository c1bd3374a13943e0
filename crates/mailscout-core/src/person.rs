use serde::{Deserialize, Serialize};

/// A person to enrich, keyed by their professional-network profile URL.
///
/// Names may arrive split (`first_name` + `last_name`) or combined (`name`).
/// Use [`PersonInput::name_parts`] and [`PersonInput::full_name`] rather than
/// reading the fields directly so both shapes behave the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInput {
    pub linkedin_url: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl PersonInput {
    #[must_use]
    pub fn new(linkedin_url: impl Into<String>) -> Self {
        Self {
            linkedin_url: linkedin_url.into(),
            ..Self::default()
        }
    }

    /// Returns `(first, last)`.
    ///
    /// When neither split field is set, the combined `name` is split on its
    /// first whitespace run: the first token becomes the first name and the
    /// remainder (possibly several words) the last name.
    #[must_use]
    pub fn name_parts(&self) -> (Option<String>, Option<String>) {
        let first = non_blank(self.first_name.as_deref());
        let last = non_blank(self.last_name.as_deref());
        if first.is_some() || last.is_some() {
            return (first, last);
        }

        let Some(full) = non_blank(self.name.as_deref()) else {
            return (None, None);
        };

        match full.split_once(char::is_whitespace) {
            Some((head, rest)) => (Some(head.to_owned()), non_blank(Some(rest))),
            None => (Some(full), None),
        }
    }

    /// Combined display name derived from [`PersonInput::name_parts`].
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        match self.name_parts() {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(only), None) | (None, Some(only)) => Some(only),
            (None, None) => None,
        }
    }

    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref().filter(|c| !c.trim().is_empty())
    }

    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// A person is enrichable once it carries a non-blank profile URL.
    #[must_use]
    pub fn has_profile_url(&self) -> bool {
        !self.linkedin_url.trim().is_empty()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_name(name: &str) -> PersonInput {
        PersonInput {
            name: Some(name.to_string()),
            ..PersonInput::new("https://linkedin.com/in/jdoe")
        }
    }

    #[test]
    fn split_fields_win_over_combined_name() {
        let person = PersonInput {
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            name: Some("Somebody Else".to_string()),
            ..PersonInput::new("https://linkedin.com/in/jdoe")
        };
        assert_eq!(
            person.name_parts(),
            (Some("Jane".to_string()), Some("Doe".to_string()))
        );
    }

    #[test]
    fn combined_name_splits_on_first_whitespace_run() {
        let person = with_name("  Mary   Ann van Dyke ");
        assert_eq!(
            person.name_parts(),
            (Some("Mary".to_string()), Some("Ann van Dyke".to_string()))
        );
    }

    #[test]
    fn single_token_name_has_no_last_name() {
        assert_eq!(
            with_name("Cher").name_parts(),
            (Some("Cher".to_string()), None)
        );
    }

    #[test]
    fn blank_split_fields_fall_back_to_combined_name() {
        let person = PersonInput {
            first_name: Some(String::new()),
            last_name: Some("  ".to_string()),
            ..with_name("Jane Doe")
        };
        assert_eq!(
            person.name_parts(),
            (Some("Jane".to_string()), Some("Doe".to_string()))
        );
    }

    #[test]
    fn full_name_joins_split_fields() {
        let person = PersonInput {
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            ..PersonInput::new("https://linkedin.com/in/jdoe")
        };
        assert_eq!(person.full_name().as_deref(), Some("Jane Doe"));
        assert_eq!(
            PersonInput::new("https://linkedin.com/in/x").full_name(),
            None
        );
    }

    #[test]
    fn deserializes_with_only_profile_url() {
        let person: PersonInput =
            serde_json::from_str(r#"{"linkedin_url": "https://linkedin.com/in/jdoe"}"#)
                .expect("minimal person should parse");
        assert!(person.has_profile_url());
        assert!(person.company().is_none());
    }

    #[test]
    fn blank_profile_url_is_not_enrichable() {
        assert!(!PersonInput::new("   ").has_profile_url());
    }
}
