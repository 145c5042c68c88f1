//! Agent descriptors: who a participant is and how it should behave.

use crate::{ModelConfig, ValidationError};
use std::sync::Arc;

/// Immutable description of one conversational participant.
///
/// Built per interaction and discarded afterwards. The model configuration is
/// shared with every other descriptor of the session.
#[derive(Debug, Clone)]
pub struct AgentDescriptor {
    name: String,
    directive: String,
    config: Arc<ModelConfig>,
}

impl AgentDescriptor {
    /// Create a descriptor. The name must be non-blank.
    pub fn new(
        name: impl Into<String>,
        directive: impl Into<String>,
        config: Arc<ModelConfig>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "name".to_string(),
            });
        }
        Ok(Self {
            name,
            directive: directive.into(),
            config,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The behavioral framing sent as the system message.
    pub fn directive(&self) -> &str {
        &self.directive
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Shared handle to the model configuration.
    pub fn shared_config(&self) -> Arc<ModelConfig> {
        Arc::clone(&self.config)
    }
}
