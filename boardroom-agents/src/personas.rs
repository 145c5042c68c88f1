//! Built-in EdTech marketing personas and default prompts.

use boardroom_core::{AgentDescriptor, ModelConfig, ValidationError};
use std::sync::Arc;

pub const STRATEGIST_NAME: &str = "marketing_strategist";
pub const CMO_NAME: &str = "CMO";
pub const CEO_NAME: &str = "CEO";

pub const STRATEGIST_DIRECTIVE: &str = "You are an expert marketing strategist for both B2B and B2C businesses. \
Your expertise lies in creating growth and go-to-market strategies for companies and products in the EdTech industry.";

pub const CMO_DIRECTIVE: &str = "You are a Chief Marketing Officer in an EdTech company. \
You are discussing with the CEO whether you should focus more on B2B or B2C for project management courses. \
As the CMO, you want to focus on B2B.";

pub const CEO_DIRECTIVE: &str = "You are the CEO of an EdTech company. \
You are discussing with the CMO whether you should focus more on B2B or B2C for project management courses. \
As the CEO, you want to focus on B2C.";

/// Request used when the strategist is asked without one.
pub const DEFAULT_STRATEGY_REQUEST: &str =
    "I want some solid marketing strategies for B2B promotions for my project management courses.";

/// The CMO's opening argument when none is given.
pub const DEFAULT_OPENING_MESSAGE: &str =
    "I think we should focus more on B2B business for our project management courses";

pub fn marketing_strategist(config: Arc<ModelConfig>) -> Result<AgentDescriptor, ValidationError> {
    AgentDescriptor::new(STRATEGIST_NAME, STRATEGIST_DIRECTIVE, config)
}

pub fn cmo(config: Arc<ModelConfig>) -> Result<AgentDescriptor, ValidationError> {
    AgentDescriptor::new(CMO_NAME, CMO_DIRECTIVE, config)
}

pub fn ceo(config: Arc<ModelConfig>) -> Result<AgentDescriptor, ValidationError> {
    AgentDescriptor::new(CEO_NAME, CEO_DIRECTIVE, config)
}

/// CMO and CEO sharing one configuration, initiator first.
pub fn c_suite(config: Arc<ModelConfig>) -> Result<(AgentDescriptor, AgentDescriptor), ValidationError> {
    Ok((cmo(Arc::clone(&config))?, ceo(config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SpeakerTag;

    #[test]
    fn test_c_suite_shares_config_and_renders_with_own_tags() {
        let config = Arc::new(ModelConfig::with_default_model("sk-test"));
        let (cmo, ceo) = c_suite(Arc::clone(&config)).unwrap();

        assert!(Arc::ptr_eq(&cmo.shared_config(), &ceo.shared_config()));
        assert_eq!(SpeakerTag::for_speaker(cmo.name()), SpeakerTag::Cmo);
        assert_eq!(SpeakerTag::for_speaker(ceo.name()), SpeakerTag::Ceo);
        assert!(cmo.directive().contains("focus on B2B"));
        assert!(ceo.directive().contains("focus on B2C"));
    }

    #[test]
    fn test_strategist_descriptor() {
        let config = Arc::new(ModelConfig::with_default_model("sk-test"));
        let strategist = marketing_strategist(config).unwrap();
        assert_eq!(strategist.name(), "marketing_strategist");
        assert!(strategist.directive().contains("EdTech"));
    }
}
