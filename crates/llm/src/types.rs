//! LLM provider identifiers.

/// Provider type enum for matching configuration strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderType {
    /// Deterministic offline provider (keyword classification, templated answers)
    #[default]
    Mock,

    /// Network-backed OpenAI-compatible provider
    OpenAI,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Some(Self::Mock),
            "openai" => Some(Self::OpenAI),
            _ => None,
        }
    }

    /// Resolve a configured provider name, falling back to `Mock` when the
    /// name is empty or unknown.
    pub fn resolve(s: Option<&str>) -> Self {
        match s {
            Some(name) if !name.trim().is_empty() => Self::parse(name).unwrap_or_else(|| {
                tracing::warn!("Unknown LLM provider '{}', using mock provider", name);
                Self::Mock
            }),
            _ => Self::Mock,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::OpenAI => "openai",
        }
    }
}
