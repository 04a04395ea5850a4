//! # Assist State
//!
//! The description generator shared by every request.

use std::sync::Arc;

use pambala_assist::{build_generator, AssistConfig, DescriptionGenerator};

/// Shell-managed handle to the description generator.
#[derive(Clone)]
pub struct AssistState {
    generator: Arc<dyn DescriptionGenerator>,
}

impl AssistState {
    /// Builds the generator from configuration.
    pub fn from_config(config: &AssistConfig) -> Self {
        AssistState {
            generator: build_generator(config),
        }
    }

    /// Uses an existing generator.
    pub fn with_generator(generator: Arc<dyn DescriptionGenerator>) -> Self {
        AssistState { generator }
    }

    pub fn generator(&self) -> Arc<dyn DescriptionGenerator> {
        Arc::clone(&self.generator)
    }
}

impl std::fmt::Debug for AssistState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistState").finish_non_exhaustive()
    }
}
