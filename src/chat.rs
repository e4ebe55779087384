use anyhow::{bail, Context};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// The one user-visible failure message for the chat widget; everything that
/// can go wrong on the relay collapses into it (the underlying cause only
/// goes to the log).
pub const CHAT_UNAVAILABLE: &str = "Sorry, I encountered an error. Please try again later.";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const EXPECTED_TEST_STATUS: &str = "API is working!";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TestResponse {
    status: String,
}

/// Blocking relay to the chatbot backend. One request, no retries.
pub struct ChatClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>) -> ChatClient {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        ChatClient {
            base_url: base_url.into(),
            agent,
        }
    }

    pub fn from_env() -> ChatClient {
        let base = std::env::var("PORTALD_CHAT_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        ChatClient::new(base)
    }

    pub fn send(&self, message: &str, language: &str) -> anyhow::Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let reply: ChatResponse = self
            .agent
            .post(&url)
            .send_json(json!({ "message": message, "language": language }))
            .with_context(|| format!("POST {}", url))?
            .into_json()
            .context("parse chat response body")?;
        Ok(reply.response)
    }

    pub fn ping(&self) -> anyhow::Result<()> {
        let url = format!("{}/api/test", self.base_url);
        let reply: TestResponse = self
            .agent
            .get(&url)
            .call()
            .with_context(|| format!("GET {}", url))?
            .into_json()
            .context("parse test response body")?;
        if reply.status != EXPECTED_TEST_STATUS {
            bail!("unexpected test status: {}", reply.status);
        }
        Ok(())
    }
}
