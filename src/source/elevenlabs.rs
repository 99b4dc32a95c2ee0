use super::{ConfigSource, TRACING_TARGET, ensure_object};
use crate::error::{SettingsError, SourceError};
use crate::payload::access::pretty;
use crate::settings::ProviderSettings;
use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::{Map, Value};

const API_KEY_HEADER: &str = "xi-api-key";

/// Reads agent configurations from the ElevenLabs conversational-AI API.
#[derive(Debug, Clone)]
pub struct ElevenLabsSource {
    client: Client,
    api_key: String,
    base_url: String,
    default_agent: Option<String>,
}

impl ElevenLabsSource {
    pub fn new(api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            default_agent: None,
        }
    }

    /// Builds a source from resolved settings. The API key is required; the
    /// agent id, when present, becomes the default agent.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, SettingsError> {
        let mut source = Self::new(settings.require_api_key()?, &settings.base_url);
        source.default_agent = settings.agent_id.clone();
        Ok(source)
    }

    pub fn with_default_agent(mut self, agent_id: &str) -> Self {
        self.default_agent = Some(agent_id.to_string());
        self
    }

    fn agent_url(&self, agent_id: &str) -> Result<Url, SourceError> {
        let invalid = || SourceError::InvalidBaseUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["v1", "convai", "agents", agent_id]);
        Ok(url)
    }
}

impl ConfigSource for ElevenLabsSource {
    fn default_agent_id(&self) -> Option<String> {
        self.default_agent.clone()
    }

    fn fetch(&self, agent_id: &str) -> Result<Value, SourceError> {
        let url = self.agent_url(agent_id)?;
        tracing::info!(target: TRACING_TARGET, agent_id, "Fetching agent config");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()?;
        let status = response.status();
        let body = response.text()?;
        let parsed = parse_body(body);

        if !status.is_success() {
            let mut details = pretty(&parsed);
            if details.is_empty() || details == "{}" {
                details = status.canonical_reason().unwrap_or_default().to_string();
            }
            tracing::warn!(
                target: TRACING_TARGET,
                agent_id,
                status = status.as_u16(),
                "Upstream rejected agent config request"
            );
            return Err(SourceError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        ensure_object(parsed)
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Http(Box::new(err))
    }
}

/// Empty bodies read as `{}`; bodies that are not JSON are kept as text.
fn parse_body(body: String) -> Value {
    if body.is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}
