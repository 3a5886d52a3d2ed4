//! Shared test doubles.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use strictly_chess::{CompletionProvider, LlmError};

/// Provider that replays canned completions and records prompts.
///
/// Once the script runs out it answers with an empty string.
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    replies: Arc<Mutex<VecDeque<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.iter().map(|r| r.to_string()).collect())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait::async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        Ok(self
            .replies
            .lock()
            .expect("script poisoned")
            .pop_front()
            .unwrap_or_default())
    }
}

/// Provider whose every call fails.
pub struct FailingProvider;

#[async_trait::async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::new("connection refused".to_string()))
    }
}
