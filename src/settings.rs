//! Provider settings resolved from the process environment.

use crate::error::SettingsError;
use std::fmt;

pub const API_KEY_VARS: [&str; 3] = [
    "ELEVENLABS_API_KEY",
    "ELEVEN_LABS_API_KEY",
    "VITE_ELEVENLABS_API_KEY",
];

/// The dedicated agent variable comes first; the generic ones are fallbacks.
pub const AGENT_ID_VARS: [&str; 4] = [
    "MJRVS_ELEVENLABS_AGENT_ID",
    "NEXT_PUBLIC_ELEVENLABS_AGENT_ID",
    "ELEVENLABS_AGENT_ID",
    "VITE_ELEVENLABS_AGENT_ID",
];

pub const BASE_URL_VAR: &str = "ELEVENLABS_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub agent_id: Option<String>,
    pub base_url: String,
}

impl ProviderSettings {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Resolves settings from an arbitrary set of variables.
    ///
    /// For each setting the candidate names are tried in order with an exact
    /// match first, then case-insensitively. Blank values count as unset.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();
        Self {
            api_key: lookup(&vars, &API_KEY_VARS),
            agent_id: lookup(&vars, &AGENT_ID_VARS),
            base_url: lookup(&vars, &[BASE_URL_VAR])
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn require_api_key(&self) -> Result<&str, SettingsError> {
        self.api_key.as_deref().ok_or(SettingsError::MissingApiKey)
    }

    pub fn require_agent_id(&self) -> Result<&str, SettingsError> {
        self.agent_id.as_deref().ok_or(SettingsError::MissingAgentId)
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            agent_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("agent_id", &self.agent_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn lookup(vars: &[(String, String)], candidates: &[&str]) -> Option<String> {
    let exact = candidates.iter().find_map(|candidate| {
        vars.iter()
            .find(|(name, _)| name == candidate)
            .and_then(|(_, value)| normalize(value))
    });

    exact.or_else(|| {
        candidates.iter().find_map(|candidate| {
            vars.iter()
                .filter(|(name, _)| name.eq_ignore_ascii_case(candidate))
                .find_map(|(_, value)| normalize(value))
        })
    })
}
