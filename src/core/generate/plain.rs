//! Types the user always supplies.

use super::{GenerateOptions, SecretHandler};
use crate::error::Result;

/// A non-generable type such as `string` or `boolean`.
pub struct PlainHandler {
    kind: &'static str,
    description: &'static str,
}

impl PlainHandler {
    pub fn new(kind: &'static str, description: &'static str) -> Self {
        Self { kind, description }
    }
}

impl SecretHandler for PlainHandler {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn generate(&self, _options: &GenerateOptions) -> Result<Option<String>> {
        Ok(None)
    }
}
