use anyhow::{Context, Result};
use log::info;
use reqwest::blocking::Client;

pub const COVID_URL: &str = "https://covid-api.mmediagroup.fr/v1/cases";
pub const COMPETITIONS_URL: &str = "http://api.football-data.org/v2/competitions";

/// Header carrying the football-data API token
const AUTH_HEADER: &str = "X-Auth-Token";

/// One upstream API
#[derive(Debug, Clone)]
pub struct Endpoint {
    /// Label used in log lines
    pub name: &'static str,
    pub url: String,
    /// Static token sent as `X-Auth-Token`
    pub token: Option<String>,
}

impl Endpoint {
    pub fn covid(url: impl Into<String>) -> Self {
        Self {
            name: "Covid19 API",
            url: url.into(),
            token: None,
        }
    }

    pub fn competitions(url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            name: "Competitions API",
            url: url.into(),
            token,
        }
    }
}

/// Source of raw response bodies
pub trait Fetch {
    fn fetch(&self, endpoint: &Endpoint) -> Result<String>;
}

pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("api2sql/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

impl Fetch for ApiClient {
    /// GET the endpoint and return its body. Non-success statuses are errors.
    fn fetch(&self, endpoint: &Endpoint) -> Result<String> {
        let mut request = self.client.get(&endpoint.url);
        if let Some(token) = &endpoint.token {
            request = request.header(AUTH_HEADER, token);
        }

        let response = request
            .send()
            .with_context(|| format!("Failed to reach {}", endpoint.name))?;
        info!("{}: {}", endpoint.name, response.status());

        let response = response
            .error_for_status()
            .with_context(|| format!("{} returned an error status", endpoint.name))?;
        response
            .text()
            .with_context(|| format!("Failed to read {} response", endpoint.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer a single request with `status` and a well-formed JSON body
    fn serve_once(status: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);

            let body = r#"{"France": {"All": {"confirmed": 1, "deaths": 0}}}"#;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{}/v1/cases", addr)
    }

    #[test]
    fn test_endpoints() {
        let covid = Endpoint::covid(COVID_URL);
        assert_eq!(covid.url, COVID_URL);
        assert!(covid.token.is_none());

        let competitions = Endpoint::competitions(COMPETITIONS_URL, Some("abc".to_string()));
        assert_eq!(competitions.name, "Competitions API");
        assert_eq!(competitions.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_unreachable_host_is_an_error() {
        let client = ApiClient::new().unwrap();
        let endpoint = Endpoint::covid("http://127.0.0.1:1/v1/cases");
        assert!(client.fetch(&endpoint).is_err());
    }

    #[test]
    fn test_success_status_returns_body() {
        let client = ApiClient::new().unwrap();
        let body = client.fetch(&Endpoint::covid(serve_once("200 OK"))).unwrap();
        assert!(body.contains("France"));
    }

    #[test]
    fn test_server_error_status_is_fatal() {
        let client = ApiClient::new().unwrap();
        let err = client
            .fetch(&Endpoint::covid(serve_once("500 Internal Server Error")))
            .unwrap_err();
        assert!(err.to_string().contains("Covid19 API returned an error status"));
    }

    #[test]
    fn test_forbidden_status_is_fatal() {
        let client = ApiClient::new().unwrap();
        let endpoint = Endpoint::competitions(serve_once("403 Forbidden"), None);
        assert!(client.fetch(&endpoint).is_err());
    }
}
