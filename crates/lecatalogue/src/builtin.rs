// Built-in endpoint table

use crate::descriptor::{Category, Difficulty, EndpointDescriptor};

/// Server keys curated as recommended for cloud deployments
pub const RECOMMENDED_CLOUD: &[&str] = &["openai", "anthropic"];

/// Server keys curated as recommended for local deployments
pub const RECOMMENDED_LOCAL: &[&str] = &["ollama", "lmstudio"];

/// Known AI-service endpoints, cloud entries first.
///
/// The order here is the catalog iteration order and therefore the order in
/// which equal-ranked suggestions are listed.
pub fn builtin_descriptors() -> Vec<EndpointDescriptor> {
    vec![
        // Cloud
        EndpointDescriptor::new("openai", "OpenAI", Category::Cloud, Difficulty::Easy)
            .with_defaults("api.openai.com", "443", "/v1/chat/completions")
            .with_models(&["gpt", "o1", "o3", "chatgpt"])
            .with_api_key(true)
            .with_streaming(true)
            .recommended(true)
            .with_features(&["Function calling", "Vision", "JSON mode"]),
        EndpointDescriptor::new("anthropic", "Anthropic", Category::Cloud, Difficulty::Easy)
            .with_defaults("api.anthropic.com", "443", "/v1/messages")
            .with_models(&["claude"])
            .with_api_key(true)
            .with_streaming(true)
            .recommended(true)
            .with_features(&["Long context", "Tool use", "Vision"]),
        EndpointDescriptor::new("google", "Google Gemini", Category::Cloud, Difficulty::Medium)
            .with_defaults("generativelanguage.googleapis.com", "443", "/v1beta/models")
            .with_models(&["gemini", "palm"])
            .with_api_key(true)
            .with_streaming(true)
            .with_features(&["Multimodal", "Long context"]),
        EndpointDescriptor::new("groq", "Groq", Category::Cloud, Difficulty::Easy)
            .with_defaults("api.groq.com", "443", "/openai/v1/chat/completions")
            .with_models(&["llama", "mixtral", "gemma"])
            .with_api_key(true)
            .with_streaming(true)
            .with_features(&["Low latency", "OpenAI compatible"]),
        EndpointDescriptor::new("mistral", "Mistral AI", Category::Cloud, Difficulty::Easy)
            .with_defaults("api.mistral.ai", "443", "/v1/chat/completions")
            .with_models(&["mistral", "mixtral", "codestral"])
            .with_api_key(true)
            .with_streaming(true)
            .with_features(&["Function calling", "JSON mode"]),
        EndpointDescriptor::new("openrouter", "OpenRouter", Category::Cloud, Difficulty::Medium)
            .with_defaults("openrouter.ai", "443", "/api/v1/chat/completions")
            .with_models(&["gpt", "claude", "gemini", "llama", "mistral"])
            .with_api_key(true)
            .with_streaming(true)
            .with_features(&["Model routing", "Unified billing"]),
        EndpointDescriptor::new("together", "Together AI", Category::Cloud, Difficulty::Medium)
            .with_defaults("api.together.xyz", "443", "/v1/chat/completions")
            .with_models(&["llama", "mixtral", "qwen"])
            .with_api_key(true)
            .with_streaming(true)
            .with_features(&["Open models", "Fine-tuning"]),
        // Local
        EndpointDescriptor::new("ollama", "Ollama", Category::Local, Difficulty::Easy)
            .with_defaults("localhost", "11434", "/v1/chat/completions")
            .with_models(&["llama", "mistral", "gemma", "qwen", "phi", "codellama"])
            .with_streaming(true)
            .recommended(true)
            .with_features(&["One-line install", "Model library", "OpenAI compatible"]),
        EndpointDescriptor::new("lmstudio", "LM Studio", Category::Local, Difficulty::Easy)
            .with_defaults("localhost", "1234", "/v1/chat/completions")
            .with_models(&["llama", "mistral", "phi", "qwen"])
            .with_streaming(true)
            .with_features(&["Desktop app", "OpenAI compatible"]),
        EndpointDescriptor::new("llamacpp", "llama.cpp server", Category::Local, Difficulty::Medium)
            .with_defaults("localhost", "8080", "/v1/chat/completions")
            .with_models(&["llama", "alpaca", "vicuna"])
            .with_streaming(true)
            .with_features(&["GGUF", "CPU inference"]),
        EndpointDescriptor::new("vllm", "vLLM", Category::Local, Difficulty::Hard)
            .with_defaults("localhost", "8000", "/v1/chat/completions")
            .with_models(&["llama", "mistral", "qwen"])
            .with_streaming(true)
            .with_features(&["High throughput", "GPU serving"]),
        EndpointDescriptor::new("localai", "LocalAI", Category::Local, Difficulty::Medium)
            .with_defaults("localhost", "8080", "/v1/chat/completions")
            .with_models(&["llama", "alpaca", "gpt4all"])
            .with_streaming(true)
            .with_features(&["Drop-in replacement", "Multiple backends"]),
        EndpointDescriptor::new(
            "textgen",
            "text-generation-webui",
            Category::Local,
            Difficulty::Hard,
        )
        .with_defaults("localhost", "5000", "/api/v1/generate")
        .with_models(&["llama", "alpaca", "vicuna"])
        .with_features(&["Web UI", "Extensions"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_keys_are_unique() {
        let descriptors = builtin_descriptors();
        let keys: HashSet<_> = descriptors.iter().map(|d| d.server_key.as_str()).collect();
        assert_eq!(keys.len(), descriptors.len());
    }

    #[test]
    fn builtin_ports_are_valid() {
        for descriptor in builtin_descriptors() {
            assert!(
                descriptor.port_number().is_some(),
                "{} has invalid port {}",
                descriptor.server_key,
                descriptor.default_port
            );
        }
    }

    #[test]
    fn curated_keys_exist_with_matching_category() {
        let descriptors = builtin_descriptors();
        for (keys, category) in [
            (RECOMMENDED_CLOUD, Category::Cloud),
            (RECOMMENDED_LOCAL, Category::Local),
        ] {
            for key in keys {
                let found = descriptors
                    .iter()
                    .find(|d| d.server_key == *key)
                    .unwrap_or_else(|| panic!("missing curated key {key}"));
                assert_eq!(found.category, category);
            }
        }
    }
}
