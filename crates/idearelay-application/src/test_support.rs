//! Deterministic fakes shared by the service tests.

use async_trait::async_trait;
use idearelay_core::agent::{AgentError, CompletionAgent};
use idearelay_core::error::Result;
use idearelay_core::history::{HistoryEntry, HistoryRepository, push_capped};
use idearelay_core::mail::{MailError, MailTransport, OutboundEmail};
use idearelay_core::message::ChatMessage;
use idearelay_core::settings::{Settings, SettingsRepository};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Agent returning canned responses in order, then repeating the last one.
pub struct ScriptedAgent {
    responses: Vec<std::result::Result<String, AgentError>>,
    calls: AtomicUsize,
}

impl ScriptedAgent {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(|s| Ok(s.into())).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            responses: vec![Err(AgentError::Process {
                status_code: Some(503),
                message: "unavailable".to_string(),
                is_retryable: true,
            })],
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionAgent for ScriptedAgent {
    async fn generate(&self, _messages: &[ChatMessage]) -> std::result::Result<String, AgentError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(index.min(self.responses.len().saturating_sub(1)))
            .cloned()
            .unwrap_or(Err(AgentError::EmptyResponse))
    }
}

/// In-memory history repository.
#[derive(Default)]
pub struct MemoryHistory {
    pub entries: Mutex<Vec<HistoryEntry>>,
}

#[async_trait]
impl HistoryRepository for MemoryHistory {
    async fn load(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn record(&self, entry: HistoryEntry) -> Result<()> {
        push_capped(&mut self.entries.lock().unwrap(), entry);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.entries.lock().unwrap().retain(|entry| entry.id != id);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}

/// In-memory settings repository.
#[derive(Default)]
pub struct MemorySettings {
    pub stored: Mutex<Settings>,
}

#[async_trait]
impl SettingsRepository for MemorySettings {
    async fn load(&self) -> Result<Settings> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save(&self, settings: &Settings) -> Result<()> {
        *self.stored.lock().unwrap() = settings.clone();
        Ok(())
    }
}

/// Mail transport that counts sends and optionally fails.
#[derive(Default)]
pub struct CountingMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
    pub fail: bool,
}

impl CountingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailTransport for CountingMailer {
    async fn send(&self, email: &OutboundEmail) -> std::result::Result<(), MailError> {
        if self.fail {
            return Err(MailError::Delivery("smtp 451".to_string()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}
