//! Client context enrichment for submitted responses
//!
//! Describes who is answering (browser family, operating system, device
//! class, locale) without the wizard having to know where that information
//! comes from. Providers are injected into [`crate::wizard::SurveyWizard`].

pub mod system;
pub mod user_agent;

use serde::{Deserialize, Serialize};

pub use system::SystemContext;
pub use user_agent::UserAgentContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Desktop,
    Tablet,
    Mobile,
}

/// Metadata merged into the submission body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMetadata {
    pub browser: String,
    pub os: String,
    pub device: DeviceClass,
    #[serde(rename = "language", default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Source of client metadata for the submission path
pub trait ClientContextProvider: Send + Sync {
    fn client_metadata(&self) -> Option<ClientMetadata>;
}

/// Provider that never enriches submissions
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClientContext;

impl ClientContextProvider for NoClientContext {
    fn client_metadata(&self) -> Option<ClientMetadata> {
        None
    }
}

/// Fixed metadata, mostly useful for tests and replaying captured sessions
#[derive(Debug, Clone)]
pub struct StaticContext(pub ClientMetadata);

impl ClientContextProvider for StaticContext {
    fn client_metadata(&self) -> Option<ClientMetadata> {
        Some(self.0.clone())
    }
}
