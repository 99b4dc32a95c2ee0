use crate::chunk::{
    ChunkContent, ConfigChunk, ConversationInitiation, GlobalConfigContent, LlmSelection,
    RootPromptContent,
};
use crate::payload::RootAgent;
use chrono::{DateTime, Utc};

pub(super) const GLOBAL_CONFIG_ID: &str = "global_config";
pub(super) const ROOT_PROMPT_ID: &str = "root_prompt";

/// Bundles the root agent's LLM, TTS, turn-taking and initiation settings.
pub(super) fn global_config_chunk(root: &RootAgent, snapshot_at: DateTime<Utc>) -> ConfigChunk {
    let prompt = &root.prompt;
    let content = GlobalConfigContent {
        llm_selection: LlmSelection {
            llm: prompt.llm.clone(),
            reasoning_effort: prompt.reasoning_effort.clone(),
            thinking_budget: prompt.thinking_budget.clone(),
            temperature: prompt.temperature.clone(),
            max_tokens: prompt.max_tokens.clone(),
            backup_llm_config: prompt.backup_llm_config.clone(),
            cascade_timeout_seconds: prompt.cascade_timeout_seconds.clone(),
        },
        tts_settings: root.tts.clone(),
        turn_config: root.turn.clone(),
        conversation_initiation_settings: ConversationInitiation {
            first_message: root.first_message.clone().unwrap_or_default(),
            disable_first_message_interruptions: root.disable_first_message_interruptions.clone(),
            language: root.language.clone(),
        },
    };

    ConfigChunk::new(
        "Global Config",
        GLOBAL_CONFIG_ID,
        ChunkContent::GlobalConfig(content),
        snapshot_at,
    )
}

pub(super) fn root_prompt_chunk(root: &RootAgent, snapshot_at: DateTime<Utc>) -> ConfigChunk {
    let content = RootPromptContent {
        prompt: root.prompt.prompt.clone().unwrap_or_default(),
        llm: root.prompt.llm.clone(),
        full_prompt_config: root.prompt.config.clone(),
    };

    ConfigChunk::new(
        "Root Prompt",
        ROOT_PROMPT_ID,
        ChunkContent::RootPrompt(content),
        snapshot_at,
    )
}
