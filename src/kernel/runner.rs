//! Code execution boundary.
//!
//! Execution is delegated to handlers registered per language key; the
//! workspace itself never interprets source.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunnerError {
    #[error("no runner for {language} (supported: {})", .supported.join(", "))]
    UnsupportedLanguage {
        language: String,
        supported: Vec<String>,
    },

    #[error("{language} run failed: {message}")]
    Failed { language: String, message: String },
}

pub trait CodeRunner {
    fn execute(&self, source: &str, language: &str) -> Result<String, RunnerError>;
}

type Handler = Box<dyn Fn(&str) -> Result<String, String> + Send + Sync>;

pub struct RunnerRegistry {
    handlers: BTreeMap<String, Handler>,
}

impl Default for RunnerRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for RunnerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunnerRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}

impl RunnerRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("json", |source| {
            let value: serde_json::Value =
                serde_json::from_str(source).map_err(|e| e.to_string())?;
            serde_json::to_string_pretty(&value).map_err(|e| e.to_string())
        });
        registry.register("markdown", |source| Ok(source.to_string()));
        registry.register("plaintext", |source| Ok(source.to_string()));
        registry
    }

    /// Registers or replaces the handler for `language`. Keys are matched
    /// case-insensitively.
    pub fn register<F>(&mut self, language: &str, handler: F)
    where
        F: Fn(&str) -> Result<String, String> + Send + Sync + 'static,
    {
        self.handlers
            .insert(language.to_ascii_lowercase(), Box::new(handler));
    }

    pub fn supports(&self, language: &str) -> bool {
        self.handlers.contains_key(&language.to_ascii_lowercase())
    }

    pub fn languages(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }
}

impl CodeRunner for RunnerRegistry {
    fn execute(&self, source: &str, language: &str) -> Result<String, RunnerError> {
        let key = language.to_ascii_lowercase();
        let Some(handler) = self.handlers.get(&key) else {
            return Err(RunnerError::UnsupportedLanguage {
                language: language.to_string(),
                supported: self.languages(),
            });
        };
        handler(source).map_err(|message| RunnerError::Failed {
            language: key,
            message,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/runner.rs"]
mod tests;
