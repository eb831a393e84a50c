// Endpoint descriptor data model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an endpoint runs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Hosted service reached over the internet
    Cloud,
    /// Service running on the operator's own machine or network
    Local,
}

impl Category {
    /// Parse category from string.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cloud" => Some(Self::Cloud),
            "local" => Some(Self::Local),
            _ => None,
        }
    }

    /// Lowercase name as used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Setup effort for an endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Works out of the box
    Easy,
    /// Needs some configuration
    Medium,
    /// Needs manual installation or tuning
    Hard,
}

impl Difficulty {
    /// Parse difficulty from string.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    /// Lowercase name as used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static connection profile for one AI service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Unique identifier within a catalog
    pub server_key: String,

    /// Human-readable name
    #[serde(default)]
    pub display_name: String,

    /// Cloud or local
    pub category: Category,

    /// Setup effort
    pub difficulty: Difficulty,

    /// Whether the service needs an API key
    #[serde(default)]
    pub requires_api_key: bool,

    /// Whether the service streams responses
    #[serde(default)]
    pub supports_streaming: bool,

    /// Model-name substrings the service is known to handle
    #[serde(default)]
    pub models_supported: Vec<String>,

    /// Default host name
    pub default_host: String,

    /// Default port, kept as declared
    pub default_port: String,

    /// Default request path
    pub default_endpoint_path: String,

    /// Catalog-curated recommendation flag
    #[serde(default)]
    pub is_recommended: bool,

    /// Short capability labels, display only
    #[serde(default)]
    pub features: Vec<String>,
}

impl EndpointDescriptor {
    /// Create a descriptor with empty connection defaults
    pub fn new(
        server_key: impl Into<String>,
        display_name: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            server_key: server_key.into(),
            display_name: display_name.into(),
            category,
            difficulty,
            requires_api_key: false,
            supports_streaming: false,
            models_supported: Vec::new(),
            default_host: String::new(),
            default_port: String::new(),
            default_endpoint_path: String::new(),
            is_recommended: false,
            features: Vec::new(),
        }
    }

    /// Set connection defaults
    pub fn with_defaults(
        mut self,
        host: impl Into<String>,
        port: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        self.default_host = host.into();
        self.default_port = port.into();
        self.default_endpoint_path = path.into();
        self
    }

    /// Set the supported model substrings
    pub fn with_models(mut self, models: &[&str]) -> Self {
        self.models_supported = models.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Set the capability labels
    pub fn with_features(mut self, features: &[&str]) -> Self {
        self.features = features.iter().map(|f| f.to_string()).collect();
        self
    }

    /// Mark as requiring an API key
    pub fn with_api_key(mut self, required: bool) -> Self {
        self.requires_api_key = required;
        self
    }

    /// Mark as streaming-capable
    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.supports_streaming = streaming;
        self
    }

    /// Set the curated recommendation flag
    pub fn recommended(mut self, flag: bool) -> Self {
        self.is_recommended = flag;
        self
    }

    /// Default port as a number, if it is a valid TCP port
    pub fn port_number(&self) -> Option<u16> {
        match self.default_port.trim().parse::<u16>() {
            Ok(0) | Err(_) => None,
            Ok(port) => Some(port),
        }
    }

    /// Name to show in lists, falling back to the key
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.server_key
        } else {
            &self.display_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_and_difficulty_parse() {
        assert_eq!(Category::parse("Cloud"), Some(Category::Cloud));
        assert_eq!(Category::parse(" local "), Some(Category::Local));
        assert_eq!(Category::parse("edge"), None);

        assert_eq!(Difficulty::parse("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("medium"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("trivial"), None);
    }

    #[test]
    fn port_number_rejects_zero_and_garbage() {
        let base = EndpointDescriptor::new("x", "X", Category::Local, Difficulty::Easy);
        assert_eq!(
            base.clone().with_defaults("localhost", "11434", "/").port_number(),
            Some(11434)
        );
        assert_eq!(base.clone().with_defaults("localhost", "0", "/").port_number(), None);
        assert_eq!(base.clone().with_defaults("localhost", "70000", "/").port_number(), None);
        assert_eq!(base.with_defaults("localhost", "http", "/").port_number(), None);
    }

    #[test]
    fn label_falls_back_to_key() {
        let unnamed = EndpointDescriptor::new("vllm", "", Category::Local, Difficulty::Hard);
        assert_eq!(unnamed.label(), "vllm");

        let named = EndpointDescriptor::new("vllm", "vLLM", Category::Local, Difficulty::Hard);
        assert_eq!(named.label(), "vLLM");
    }

    #[test]
    fn descriptor_deserializes_with_defaults() {
        let raw = r#"
            server_key = "koboldcpp"
            category = "local"
            difficulty = "medium"
            default_host = "localhost"
            default_port = "5001"
            default_endpoint_path = "/v1/chat/completions"
        "#;

        let descriptor: EndpointDescriptor = toml::from_str(raw).unwrap();
        assert_eq!(descriptor.category, Category::Local);
        assert_eq!(descriptor.difficulty, Difficulty::Medium);
        assert!(descriptor.models_supported.is_empty());
        assert!(!descriptor.is_recommended);
        assert_eq!(descriptor.label(), "koboldcpp");
    }
}
