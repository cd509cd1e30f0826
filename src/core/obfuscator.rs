//! Resolve-then-mask pipeline shared by the CLI and the event handler

use crate::adapters::storage::ObjectStorage;
use crate::core::masking::FieldMaskingEngine;
use crate::core::resolver::RequestResolver;
use crate::domain::{RedactionResult, Result};
use std::sync::Arc;

/// Runs the request resolver and the masking engine over one payload
pub struct Obfuscator {
    resolver: RequestResolver,
    engine: FieldMaskingEngine,
}

impl Obfuscator {
    /// Create a pipeline whose components share `storage`
    pub fn new(storage: Arc<dyn ObjectStorage>) -> Self {
        Self {
            resolver: RequestResolver::new(storage.clone()),
            engine: FieldMaskingEngine::new(storage),
        }
    }

    /// Validate `payload` and mask the source it names
    ///
    /// # Errors
    ///
    /// Any error of [`RequestResolver::resolve`] or
    /// [`FieldMaskingEngine::mask`]; the masking step never runs when
    /// resolution fails.
    pub async fn obfuscate(&self, payload: &str) -> Result<RedactionResult> {
        let request = self.resolver.resolve(payload).await?;
        self.engine.mask(&request).await
    }
}
