//! Endpoint URL formatting and connection-triplet validation

use lecatalogue::EndpointDescriptor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Host suffixes treated as public HTTPS services
pub const HTTPS_HOST_SUFFIXES: &[&str] = &[".com", ".ai", ".co"];

/// Standard HTTPS port
pub const HTTPS_PORT: &str = "443";

/// Build a canonical URL from a host/port/path triplet.
///
/// HTTPS is used when forced, when the port is 443, or when the host ends with
/// one of [`HTTPS_HOST_SUFFIXES`]. The port segment is left out only for HTTPS
/// on 443 (and when no port is given).
pub fn format_url(host: &str, port: &str, path: &str, force_https: bool) -> String {
    let host = host.trim();
    let port = port.trim();
    let path = path.trim();

    let lower_host = host.to_ascii_lowercase();
    let https = force_https
        || port == HTTPS_PORT
        || HTTPS_HOST_SUFFIXES.iter().any(|s| lower_host.ends_with(s));
    let scheme = if https { "https" } else { "http" };

    let mut url = format!("{scheme}://{host}");
    if !port.is_empty() && !(https && port == HTTPS_PORT) {
        url.push(':');
        url.push_str(port);
    }
    if !path.is_empty() {
        if !path.starts_with('/') {
            url.push('/');
        }
        url.push_str(path);
    }
    url
}

/// One problem with a host/port/path triplet
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EndpointIssue {
    /// Host is blank
    #[error("Host is required")]
    EmptyHost,

    /// Port is blank
    #[error("Port is required")]
    EmptyPort,

    /// Port contains non-digit characters
    #[error("Port must be a number (got '{0}')")]
    NonNumericPort(String),

    /// Port is not in 1..=65535
    #[error("Port must be between 1 and 65535 (got '{0}')")]
    PortOutOfRange(String),

    /// Path is blank
    #[error("Endpoint path is required")]
    EmptyPath,

    /// Path does not start with a slash
    #[error("Endpoint path must start with '/' (got '{0}')")]
    PathMissingSlash(String),
}

/// Outcome of [`validate`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EndpointValidation {
    /// True iff `errors` is empty
    pub is_valid: bool,
    /// Every problem found, in host, port, path order
    pub errors: Vec<EndpointIssue>,
}

impl EndpointValidation {
    fn from_errors(errors: Vec<EndpointIssue>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Display messages for every problem
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Check a host/port/path triplet; every failing rule is reported.
///
/// A blank port is reported both as missing and as out of range, since it reads
/// as port 0. A blank path is reported once, as missing.
pub fn validate(host: &str, port: &str, path: &str) -> EndpointValidation {
    let mut errors = Vec::new();

    if host.trim().is_empty() {
        errors.push(EndpointIssue::EmptyHost);
    }

    let port = port.trim();
    if port.is_empty() {
        errors.push(EndpointIssue::EmptyPort);
        errors.push(EndpointIssue::PortOutOfRange(port.to_string()));
    } else if !port.bytes().all(|b| b.is_ascii_digit()) {
        errors.push(EndpointIssue::NonNumericPort(port.to_string()));
    } else if !matches!(port.parse::<u32>(), Ok(1..=65535)) {
        errors.push(EndpointIssue::PortOutOfRange(port.to_string()));
    }

    let path = path.trim();
    if path.is_empty() {
        errors.push(EndpointIssue::EmptyPath);
    } else if !path.starts_with('/') {
        errors.push(EndpointIssue::PathMissingSlash(path.to_string()));
    }

    EndpointValidation::from_errors(errors)
}

/// Editable connection settings for one endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSettings {
    /// Host name
    pub host: String,
    /// Port as typed
    pub port: String,
    /// Request path
    pub path: String,
    /// Always use HTTPS
    #[serde(default)]
    pub force_https: bool,
}

impl EndpointSettings {
    /// Settings seeded from a descriptor's connection defaults
    pub fn from_descriptor(descriptor: &EndpointDescriptor) -> Self {
        Self {
            host: descriptor.default_host.clone(),
            port: descriptor.default_port.clone(),
            path: descriptor.default_endpoint_path.clone(),
            force_https: false,
        }
    }

    /// Canonical URL for these settings
    pub fn url(&self) -> String {
        format_url(&self.host, &self.port, &self.path, self.force_https)
    }

    /// Validate these settings
    pub fn validate(&self) -> EndpointValidation {
        validate(&self.host, &self.port, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lecatalogue::EndpointCatalog;
    use rstest::rstest;

    #[rstest]
    #[case("localhost", "11434", "/v1/chat/completions", false, "http://localhost:11434/v1/chat/completions")]
    #[case("api.openai.com", "443", "/v1/chat/completions", false, "https://api.openai.com/v1/chat/completions")]
    #[case("api.mistral.ai", "8443", "/v1/x", false, "https://api.mistral.ai:8443/v1/x")]
    #[case("gpu-box.lan", "443", "/v1/x", false, "https://gpu-box.lan/v1/x")]
    #[case("gpu-box.lan", "8000", "/v1/x", true, "https://gpu-box.lan:8000/v1/x")]
    #[case("Example.CO", "80", "/", false, "https://Example.CO:80/")]
    #[case("localhost", "8080", "api/generate", false, "http://localhost:8080/api/generate")]
    fn format_url_cases(
        #[case] host: &str,
        #[case] port: &str,
        #[case] path: &str,
        #[case] force_https: bool,
        #[case] expected: &str,
    ) {
        assert_eq!(format_url(host, port, path, force_https), expected);
    }

    #[test]
    fn forced_https_on_443_drops_port() {
        let url = format_url("10.0.0.5", "443", "/v1/chat", true);
        assert_eq!(url, "https://10.0.0.5/v1/chat");
        assert!(!url.contains(":443"));
    }

    #[test]
    fn all_blank_reports_four_errors() {
        let result = validate("", "", "");
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec![
                EndpointIssue::EmptyHost,
                EndpointIssue::EmptyPort,
                EndpointIssue::PortOutOfRange(String::new()),
                EndpointIssue::EmptyPath,
            ]
        );
    }

    #[test]
    fn out_of_range_port_is_the_only_error() {
        let result = validate("localhost", "999999", "/v1/x");
        assert_eq!(
            result.errors,
            vec![EndpointIssue::PortOutOfRange("999999".to_string())]
        );
    }

    #[rstest]
    #[case("0")]
    #[case("65536")]
    #[case("99999999999999999999999")]
    fn port_range_edges(#[case] port: &str) {
        let result = validate("localhost", port, "/");
        assert_eq!(result.errors, vec![EndpointIssue::PortOutOfRange(port.to_string())]);
    }

    #[test]
    fn non_numeric_port_and_relative_path() {
        let result = validate("localhost", "80a", "v1/chat");
        assert_eq!(
            result.errors,
            vec![
                EndpointIssue::NonNumericPort("80a".to_string()),
                EndpointIssue::PathMissingSlash("v1/chat".to_string()),
            ]
        );
        assert_eq!(result.messages().len(), 2);
    }

    #[test]
    fn valid_triplet() {
        let result = validate("localhost", "65535", "/");
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn settings_from_builtin_descriptors_are_valid() {
        let catalog = EndpointCatalog::builtin();
        for descriptor in catalog.iter() {
            let settings = EndpointSettings::from_descriptor(descriptor);
            assert!(settings.validate().is_valid, "{}", descriptor.server_key);
        }

        let ollama = EndpointSettings::from_descriptor(catalog.get("ollama").unwrap());
        assert_eq!(ollama.url(), "http://localhost:11434/v1/chat/completions");
    }
}
