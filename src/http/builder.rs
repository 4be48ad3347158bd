use reqwest::{Client, Method, RequestBuilder};

use crate::state::request_state::{HttpMethod, RequestState};

/// Normalize a bare URL into a fully-qualified one.
/// - `:3000/path` → `http://localhost:3000/path`
/// - `localhost/...` → `http://localhost/...`
/// - anything else without a scheme → `https://...`
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return url.to_string();
    }
    if url.starts_with(':') {
        return format!("http://localhost{}", url);
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    if url.starts_with("localhost") || url.starts_with("127.0.0.1") {
        return format!("http://{}", url);
    }
    format!("https://{}", url)
}

pub fn build_request(client: &Client, state: &RequestState) -> RequestBuilder {
    let method = match &state.method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
        HttpMethod::Head => Method::HEAD,
        HttpMethod::Options => Method::OPTIONS,
    };
    client.request(method, normalize_url(&state.url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_bare_port() {
        assert_eq!(normalize_url(":3000/api"), "http://localhost:3000/api");
    }

    #[test]
    fn test_normalize_localhost_gets_http() {
        assert_eq!(normalize_url("localhost:8080"), "http://localhost:8080");
        assert_eq!(normalize_url("127.0.0.1/x"), "http://127.0.0.1/x");
    }

    #[test]
    fn test_normalize_plain_host_gets_https() {
        assert_eq!(normalize_url("example.com/api"), "https://example.com/api");
    }

    #[test]
    fn test_normalize_keeps_explicit_scheme() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
    }
}
