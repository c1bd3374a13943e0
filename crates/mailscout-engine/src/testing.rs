//! Call-recording adapters for engine tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mailscout_core::{EnrichmentSuccess, ErrorKind, Outcome, PersonInput, ProviderId};
use mailscout_providers::{BatchProviderAdapter, ProviderAdapter};

/// One recorded adapter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub provider: ProviderId,
    pub credential: String,
    pub linkedin_url: String,
    pub batch: bool,
}

/// Shared log of every call made to any adapter built from it.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().expect("call log poisoned").clone()
    }

    pub fn providers(&self) -> Vec<ProviderId> {
        self.calls().into_iter().map(|c| c.provider).collect()
    }

    fn record(&self, provider: ProviderId, credential: &str, linkedin_url: &str, batch: bool) {
        self.0.lock().expect("call log poisoned").push(Call {
            provider,
            credential: credential.to_owned(),
            linkedin_url: linkedin_url.to_owned(),
            batch,
        });
    }
}

type Responder = Arc<dyn Fn(&PersonInput) -> Outcome + Send + Sync>;

pub(crate) fn found(provider: ProviderId, person: &PersonInput) -> Outcome {
    EnrichmentSuccess::from_email(
        Some(format!("{provider}@example.com")),
        person.linkedin_url.clone(),
        provider,
    )
    .expect("non-blank email")
    .into()
}

pub(crate) fn missed(provider: ProviderId, kind: ErrorKind, person: &PersonInput) -> Outcome {
    Outcome::failure(
        kind,
        format!("{provider} failed"),
        Some(person.linkedin_url.as_str()),
    )
}

pub(crate) struct MockAdapter {
    id: ProviderId,
    log: CallLog,
    respond: Responder,
}

impl MockAdapter {
    pub fn new<F>(id: ProviderId, log: &CallLog, respond: F) -> Self
    where
        F: Fn(&PersonInput) -> Outcome + Send + Sync + 'static,
    {
        Self {
            id,
            log: log.clone(),
            respond: Arc::new(respond),
        }
    }

    pub fn finds(id: ProviderId, log: &CallLog) -> Self {
        Self::new(id, log, move |p| found(id, p))
    }

    pub fn fails(id: ProviderId, kind: ErrorKind, log: &CallLog) -> Self {
        Self::new(id, log, move |p| missed(id, kind, p))
    }
}

#[async_trait]
impl ProviderAdapter for MockAdapter {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn enrich(&self, person: &PersonInput, credential: &str) -> Outcome {
        self.log.record(self.id, credential, &person.linkedin_url, false);
        (self.respond)(person)
    }
}

/// Batch adapter whose batch answer is scripted per position, and whose
/// single lookups use `single`.
pub(crate) struct MockBatchAdapter {
    inner: MockAdapter,
    batch: Arc<dyn Fn(&[PersonInput]) -> Vec<Outcome> + Send + Sync>,
}

impl MockBatchAdapter {
    pub fn new<F>(inner: MockAdapter, batch: F) -> Self
    where
        F: Fn(&[PersonInput]) -> Vec<Outcome> + Send + Sync + 'static,
    {
        Self {
            inner,
            batch: Arc::new(batch),
        }
    }
}

#[async_trait]
impl ProviderAdapter for MockBatchAdapter {
    fn id(&self) -> ProviderId {
        self.inner.id
    }

    async fn enrich(&self, person: &PersonInput, credential: &str) -> Outcome {
        self.inner.enrich(person, credential).await
    }
}

#[async_trait]
impl BatchProviderAdapter for MockBatchAdapter {
    async fn enrich_batch(&self, people: &[PersonInput], credential: &str) -> Vec<Outcome> {
        for person in people {
            self.inner
                .log
                .record(self.inner.id, credential, &person.linkedin_url, true);
        }
        (self.batch)(people)
    }
}

pub(crate) fn person(slug: &str) -> PersonInput {
    PersonInput::new(format!("https://www.linkedin.com/in/{slug}"))
}
