//! Model configuration shared by every agent in a session.

use crate::{ConfigError, DEFAULT_MODEL};
use secrecy::{ExposeSecret, SecretString};

/// Target model and the credential used to reach it.
///
/// Created once per session and shared read-only (behind an `Arc`) by every
/// [`AgentDescriptor`](crate::AgentDescriptor) built from it. The credential
/// is held in a [`SecretString`] so it never shows up in `Debug` output or
/// logs.
#[derive(Debug)]
pub struct ModelConfig {
    model: String,
    credential: SecretString,
}

impl ModelConfig {
    /// Build a configuration without validating it.
    ///
    /// Use [`ModelConfig::validate`] (the responder and dialogue engine call
    /// it for you) before the configuration reaches a collaborator.
    pub fn new(model: impl Into<String>, credential: impl Into<String>) -> Self {
        let credential: String = credential.into();
        Self {
            model: model.into(),
            credential: SecretString::new(credential.into()),
        }
    }

    /// Build a configuration for the default model.
    pub fn with_default_model(credential: impl Into<String>) -> Self {
        Self::new(DEFAULT_MODEL, credential)
    }

    /// Resolve the credential from an interactively supplied value, falling
    /// back to a value the caller read from its environment.
    ///
    /// Blank values are treated as absent. Fails with
    /// [`ConfigError::MissingCredential`] when neither source has a key.
    pub fn resolve(
        model: impl Into<String>,
        explicit: Option<&str>,
        fallback: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let credential = [explicit, fallback]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .ok_or(ConfigError::MissingCredential)?;

        let config = Self::new(model, credential);
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants required before any collaborator call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "model".to_string(),
                value: self.model.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        if !self.has_credential() {
            return Err(ConfigError::MissingCredential);
        }
        Ok(())
    }

    /// Model identifier, e.g. `gpt-4o-mini`.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Expose the raw credential for the outgoing request.
    pub fn credential(&self) -> &str {
        self.credential.expose_secret()
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.expose_secret().trim().is_empty()
    }
}
