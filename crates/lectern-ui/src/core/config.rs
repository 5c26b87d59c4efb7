//! API base URL resolution.
//!
//! # Design
//! - Pure over the page location parts so it can be tested natively; the wasm
//!   shell feeds it from `window.location` and local storage.
//! - An explicit override always wins, which lets a static build point at a
//!   backend on another origin.

/// Port the Trunk dev server listens on.
pub const DEV_SERVER_PORT: &str = "8080";
/// Port the backend listens on during development.
pub const DEV_BACKEND_PORT: &str = "8000";
/// Path prefix of every REST route.
pub const API_PREFIX: &str = "/api";
/// Base used when the page location cannot be parsed.
pub const FALLBACK_API_BASE: &str = "http://localhost:8000/api";

/// Resolve the REST base URL from the page location parts.
///
/// `protocol` is in `window.location` form (`"https:"`) and `port` is empty for
/// the scheme default. A non-blank `override_base` is returned with any trailing
/// slash removed.
#[must_use]
pub fn api_base_url(
    protocol: &str,
    host: &str,
    port: &str,
    override_base: Option<&str>,
) -> String {
    if let Some(base) = override_base
        .map(str::trim)
        .filter(|base| !base.is_empty())
    {
        return base.trim_end_matches('/').to_string();
    }
    if host.trim().is_empty() {
        return FALLBACK_API_BASE.to_string();
    }
    let protocol = if protocol.ends_with(':') {
        protocol.to_string()
    } else {
        format!("{protocol}:")
    };
    let mapped_port = match port {
        "" => None,
        DEV_SERVER_PORT => Some(DEV_BACKEND_PORT),
        other => Some(other),
    };
    let mut base = format!("{protocol}//{host}");
    if let Some(port) = mapped_port {
        base.push(':');
        base.push_str(port);
    }
    base.push_str(API_PREFIX);
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_server_port_maps_to_backend() {
        assert_eq!(
            api_base_url("http:", "localhost", "8080", None),
            "http://localhost:8000/api"
        );
    }

    #[test]
    fn production_keeps_origin() {
        assert_eq!(
            api_base_url("https:", "lessons.example.org", "", None),
            "https://lessons.example.org/api"
        );
        assert_eq!(
            api_base_url("http", "10.0.0.4", "9000", None),
            "http://10.0.0.4:9000/api"
        );
    }

    #[test]
    fn override_wins_and_blank_override_is_ignored() {
        assert_eq!(
            api_base_url("http:", "localhost", "8080", Some("https://api.example.org/api/")),
            "https://api.example.org/api"
        );
        assert_eq!(
            api_base_url("http:", "localhost", "8080", Some("  ")),
            "http://localhost:8000/api"
        );
    }

    #[test]
    fn missing_host_falls_back() {
        assert_eq!(api_base_url("", "", "", None), FALLBACK_API_BASE);
    }
}
