//! HTTP-backed implementations of the dataset source and classifier transport.

use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::infrastructure::traits::{ClassifierTransport, ClassifyRequest, DatasetSource, HttpReply};

/// Build an agent. `None` leaves requests without an overall timeout.
pub fn agent(timeout: Option<Duration>) -> ureq::Agent {
    let builder = ureq::AgentBuilder::new();
    match timeout {
        Some(t) => builder.timeout(t).build(),
        None => builder.build(),
    }
}

pub fn is_remote(location: &str) -> bool {
    let lowered = location.trim_start().to_ascii_lowercase();
    lowered.starts_with("http://") || lowered.starts_with("https://")
}

/// Read a response into memory, enforcing a maximum byte size.
pub fn read_response_bytes(response: ureq::Response, max_bytes: usize) -> io::Result<Vec<u8>> {
    check_content_length(&response, max_bytes)?;
    let mut limited = response.into_reader().take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(too_large(max_bytes));
    }
    Ok(bytes)
}

/// Read a response as strict UTF-8 text.
pub fn read_response_text(response: ureq::Response, max_bytes: usize) -> io::Result<String> {
    let bytes = read_response_bytes(response, max_bytes)?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Decode dataset bytes, replacing invalid UTF-8 sequences with U+FFFD.
pub fn decode_lossy(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        debug!("dataset is not valid UTF-8, decoding lossily");
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    })
}

fn too_large(max_bytes: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("response exceeded {max_bytes} bytes"),
    )
}

fn check_content_length(response: &ureq::Response, max_bytes: usize) -> io::Result<()> {
    let Some(length) = response.header("Content-Length") else {
        return Ok(());
    };
    let Ok(length) = length.parse::<u64>() else {
        return Ok(());
    };
    if length > max_bytes as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("response too large: {length} bytes"),
        ));
    }
    Ok(())
}

fn transport_error(err: ureq::Transport) -> io::Error {
    io::Error::other(err.to_string())
}

/// Reads datasets from local paths or `http(s)://` URLs.
pub struct LocationDatasetSource {
    agent: ureq::Agent,
    max_bytes: usize,
}

impl LocationDatasetSource {
    pub fn new(agent: ureq::Agent, max_bytes: usize) -> Self {
        Self { agent, max_bytes }
    }

    fn fetch_remote(&self, url: &str) -> io::Result<String> {
        match self.agent.get(url).call() {
            Ok(response) => read_response_bytes(response, self.max_bytes).map(decode_lossy),
            Err(ureq::Error::Status(code, _)) => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("HTTP {code}"),
            )),
            Err(ureq::Error::Transport(err)) => Err(transport_error(err)),
        }
    }

    fn read_local(&self, path: &Path) -> io::Result<String> {
        let len = std::fs::metadata(path)?.len();
        if len > self.max_bytes as u64 {
            return Err(too_large(self.max_bytes));
        }
        std::fs::read(path).map(decode_lossy)
    }
}

impl DatasetSource for LocationDatasetSource {
    #[instrument(skip(self))]
    fn fetch(&self, location: &str) -> io::Result<String> {
        if is_remote(location) {
            debug!("fetching dataset over HTTP");
            self.fetch_remote(location.trim())
        } else {
            debug!("reading dataset from disk");
            self.read_local(Path::new(location))
        }
    }
}

/// Posts `{"inputs": ...}` to a hosted classification endpoint.
pub struct HttpClassifier {
    agent: ureq::Agent,
    endpoint: String,
    max_bytes: usize,
}

impl HttpClassifier {
    pub fn new(agent: ureq::Agent, endpoint: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            agent,
            endpoint: endpoint.into(),
            max_bytes,
        }
    }
}

impl ClassifierTransport for HttpClassifier {
    #[instrument(skip(self, inputs, token), fields(endpoint = %self.endpoint, chars = inputs.chars().count()))]
    fn post(&self, inputs: &str, token: Option<&str>) -> io::Result<HttpReply> {
        let mut request = self
            .agent
            .post(&self.endpoint)
            .set("Accept", "application/json");
        if let Some(token) = token {
            request = request.set("Authorization", &format!("Bearer {}", token.trim()));
        }

        match request.send_json(ClassifyRequest { inputs }) {
            Ok(response) => {
                let status = response.status();
                let body = read_response_text(response, self.max_bytes)?;
                Ok(HttpReply { status, body })
            }
            Err(ureq::Error::Status(status, response)) => {
                // Error bodies are informational only; unreadable ones become empty.
                let body = read_response_text(response, self.max_bytes).unwrap_or_default();
                Ok(HttpReply { status, body })
            }
            Err(ureq::Error::Transport(err)) => Err(transport_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::{http_response, http_response_bytes, serve_once};

    #[test]
    fn given_success_when_posting_then_returns_body_and_sends_bearer() {
        let body = r#"[[{"label":"POSITIVE","score":0.98}]]"#;
        let (url, requests) = serve_once(http_response("200 OK", body));
        let classifier = HttpClassifier::new(agent(None), url, 1024);

        let reply = classifier.post("great film", Some(" secret ")).unwrap();

        assert_eq!(reply, HttpReply::new(200, body));
        let request = requests.recv().unwrap();
        assert!(request.starts_with("POST "));
        assert!(request.contains("Authorization: Bearer secret"));
    }

    #[test]
    fn given_rate_limit_when_posting_then_returns_status_reply() {
        let body = r#"{"error":"Rate limit reached"}"#;
        let (url, _requests) = serve_once(http_response("429 Too Many Requests", body));
        let classifier = HttpClassifier::new(agent(None), url, 1024);

        let reply = classifier.post("text", None).unwrap();

        assert_eq!(reply.status, 429);
        assert_eq!(reply.body, body);
    }

    #[test]
    fn given_no_token_when_posting_then_omits_authorization() {
        let (url, requests) = serve_once(http_response("200 OK", "{}"));
        let classifier = HttpClassifier::new(agent(None), url, 1024);

        classifier.post("text", None).unwrap();

        assert!(!requests.recv().unwrap().contains("Authorization"));
    }

    #[test]
    fn given_oversized_body_when_reading_then_invalid_data() {
        let body = "a".repeat(64);
        let (url, _requests) = serve_once(http_response("200 OK", &body));
        let classifier = HttpClassifier::new(agent(None), url, 16);

        let err = classifier.post("text", None).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn given_missing_remote_dataset_when_fetching_then_not_found() {
        let (url, _requests) = serve_once(http_response("404 Not Found", ""));
        let source = LocationDatasetSource::new(agent(None), 1024);

        let err = source.fetch(&url).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn given_remote_dataset_when_fetching_then_returns_text() {
        let tsv = "text\nfine\n";
        let (url, _requests) = serve_once(http_response("200 OK", tsv));
        let source = LocationDatasetSource::new(agent(None), 1024);

        assert_eq!(source.fetch(&format!("{url}/reviews.tsv")).unwrap(), tsv);
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/a.tsv"));
        assert!(is_remote("HTTP://example.com/a.tsv"));
        assert!(!is_remote("./data/reviews.tsv"));
    }

    #[test]
    fn given_remote_dataset_with_invalid_utf8_when_fetching_then_decodes_lossily() {
        let (url, _requests) = serve_once(http_response_bytes("200 OK", b"text\nCaf\xe9\n"));
        let source = LocationDatasetSource::new(agent(None), 1024);

        assert_eq!(source.fetch(&url).unwrap(), "text\nCaf\u{fffd}\n");
    }

    #[test]
    fn given_local_file_over_cap_when_fetching_then_invalid_data() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("big.tsv");
        std::fs::write(&path, "text\n".repeat(10)).unwrap();
        let source = LocationDatasetSource::new(agent(None), 16);

        let err = source.fetch(path.to_str().unwrap()).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
