use crate::config::{ClassDictConfig, DictionaryMode};
use crate::errors::{ClassDictError, Result};
use crate::value::{ClassDictionary, ClassValue};

/// Reduces `ClassValue` trees to ordered class-name tokens.
///
/// Traversal is depth-first and left-to-right, so token order follows the
/// order values were written in. That order decides which class wins later
/// conflict resolution. Tokens are never deduplicated or sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    mode: DictionaryMode,
    split_keys: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DictionaryMode::default())
    }
}

impl Normalizer {
    /// Create a normalizer using the given dictionary mode, splitting keys on whitespace
    pub fn new(mode: DictionaryMode) -> Self {
        Self {
            mode,
            split_keys: true,
        }
    }

    /// Create a normalizer from configuration
    pub fn from_config(config: &ClassDictConfig) -> Self {
        Self {
            mode: config.dictionary_mode,
            split_keys: config.split_keys,
        }
    }

    /// Set whether emitted dictionary keys are split into individual tokens
    pub fn with_split_keys(mut self, split_keys: bool) -> Self {
        self.split_keys = split_keys;
        self
    }

    pub fn mode(&self) -> DictionaryMode {
        self.mode
    }

    /// Normalize a single value
    pub fn normalize(&self, value: &ClassValue) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        self.normalize_into(value, &mut tokens)?;
        Ok(tokens)
    }

    /// Normalize several values, concatenating their tokens in order
    pub fn normalize_all(&self, values: &[ClassValue]) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        for value in values {
            self.normalize_into(value, &mut tokens)?;
        }
        Ok(tokens)
    }

    /// Normalize a value, appending its tokens to `out`.
    ///
    /// On error `out` may hold the tokens produced before the failure; the
    /// public entry points discard it.
    pub fn normalize_into(&self, value: &ClassValue, out: &mut Vec<String>) -> Result<()> {
        if !value.is_truthy() {
            return Ok(());
        }

        match value {
            ClassValue::Thunk(thunk) => {
                tracing::trace!("evaluating class thunk");
                let resolved = (**thunk)().map_err(|e| {
                    tracing::debug!(error = %e, "class thunk failed");
                    ClassDictError::ThunkFailure(e)
                })?;
                self.normalize_into(&resolved, out)
            }
            ClassValue::Text(s) => {
                out.push(s.clone());
                Ok(())
            }
            ClassValue::List(items) => {
                for item in items {
                    self.normalize_into(item, out)?;
                }
                Ok(())
            }
            ClassValue::Dictionary(dict) => self.normalize_dictionary(dict, out),
            // A bare `true` has no key to emit
            ClassValue::Flag(_) | ClassValue::Empty => Ok(()),
        }
    }

    /// Apply the dictionary mode to each entry in insertion order
    pub fn normalize_dictionary(&self, dict: &ClassDictionary, out: &mut Vec<String>) -> Result<()> {
        for (key, value) in dict {
            match self.mode {
                DictionaryMode::KeyAsClass => {
                    if value.is_true() {
                        self.emit_key(key, out);
                        continue;
                    }
                }
                DictionaryMode::ValueOnly => {
                    if key == "false" {
                        continue;
                    }
                }
            }

            if value.is_truthy() {
                self.normalize_into(value, out)?;
            }
        }
        Ok(())
    }

    fn emit_key(&self, key: &str, out: &mut Vec<String>) {
        tracing::trace!(key, "emitting dictionary key");
        if self.split_keys {
            out.extend(key.split_ascii_whitespace().map(str::to_string));
        } else if !key.is_empty() {
            out.push(key.to_string());
        }
    }
}
