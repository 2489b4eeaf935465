//! Non-fatal warnings collected during a resolution run

use serde::Serialize;

/// What a warning is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// The secrets file does not exist
    MissingSecretsFile,
    /// A variant is signed with a fallback identity
    FallbackSigning,
    /// The keystore named in the secrets file does not exist
    MissingKeystore,
}

impl DiagnosticKind {
    /// Short machine-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingSecretsFile => "missing-secrets-file",
            Self::FallbackSigning => "fallback-signing",
            Self::MissingKeystore => "missing-keystore",
        }
    }
}

/// A structured, non-fatal warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub message: String,
}

impl Diagnostic {
    /// Warning not tied to a variant
    pub fn global(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            variant: None,
            message: message.into(),
        }
    }

    /// Warning for a single variant
    pub fn for_variant(
        kind: DiagnosticKind,
        variant: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            variant: Some(variant.into()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.variant {
            Some(variant) => write!(f, "[{}] {}", variant, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
