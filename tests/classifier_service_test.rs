//! Tests for ClassifierService

use std::io;
use std::sync::{Arc, Mutex};

use rstest::rstest;

use revsent::application::services::ClassifierService;
use revsent::domain::{AnalysisError, SentimentBucket};
use revsent::infrastructure::traits::{ClassifierTransport, HttpReply};
use revsent::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

/// Replays one canned outcome and records every request.
struct MockTransport {
    outcome: Result<HttpReply, io::ErrorKind>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl MockTransport {
    fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(HttpReply::new(status, body)),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing(kind: io::ErrorKind) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(kind),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ClassifierTransport for MockTransport {
    fn post(&self, inputs: &str, token: Option<&str>) -> io::Result<HttpReply> {
        self.calls
            .lock()
            .unwrap()
            .push((inputs.to_string(), token.map(str::to_string)));
        match &self.outcome {
            Ok(reply) => Ok(reply.clone()),
            Err(kind) => Err(io::Error::new(*kind, "connection refused")),
        }
    }
}

// ============================================================
// successful replies
// ============================================================

#[rstest]
#[case::nested_list(r#"[[{"label":"POSITIVE","score":0.98},{"label":"NEGATIVE","score":0.02}]]"#, "POSITIVE", SentimentBucket::Positive)]
#[case::flat_list(r#"[{"label":"NEGATIVE","score":0.91}]"#, "NEGATIVE", SentimentBucket::Negative)]
#[case::bare_object(r#"{"label":"positive","score":0.7}"#, "POSITIVE", SentimentBucket::Positive)]
#[case::low_confidence(r#"[[{"label":"POSITIVE","score":0.5}]]"#, "POSITIVE", SentimentBucket::Neutral)]
#[case::other_label(r#"[[{"label":"LABEL_1","score":0.99}]]"#, "LABEL_1", SentimentBucket::Neutral)]
fn given_prediction_when_analyze_then_buckets_top_entry(
    #[case] body: &str,
    #[case] label: &str,
    #[case] bucket: SentimentBucket,
) {
    let transport = MockTransport::replying(200, body);
    let service = ClassifierService::new(transport.clone());

    let result = service.analyze("some review", None).unwrap();

    assert_eq!(result.label, label);
    assert_eq!(result.bucket, bucket);
}

#[test]
fn given_same_text_twice_when_analyze_then_two_requests_same_result() {
    let transport = MockTransport::replying(200, r#"[[{"label":"NEGATIVE","score":0.88}]]"#);
    let service = ClassifierService::new(transport.clone());

    let first = service.analyze("Boring.", None).unwrap();
    let second = service.analyze("Boring.", None).unwrap();

    assert_eq!(first, second);
    assert_eq!(transport.calls().len(), 2);
}

// ============================================================
// token handling
// ============================================================

#[rstest]
#[case::present(Some("hf_abc"), Some("hf_abc"))]
#[case::padded(Some("  hf_abc \n"), Some("hf_abc"))]
#[case::blank(Some("   "), None)]
#[case::absent(None, None)]
fn given_token_when_analyze_then_sends_trimmed_or_nothing(
    #[case] token: Option<&str>,
    #[case] sent: Option<&str>,
) {
    let transport = MockTransport::replying(200, r#"[[{"label":"POSITIVE","score":0.9}]]"#);
    let service = ClassifierService::new(transport.clone());

    service.analyze("text", token).unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "text");
    assert_eq!(calls[0].1.as_deref(), sent);
}

// ============================================================
// failures
// ============================================================

#[rstest]
#[case::unauthorized(401)]
#[case::forbidden(403)]
fn given_auth_status_when_analyze_then_auth_failed(#[case] status: u16) {
    let service = ClassifierService::new(MockTransport::replying(status, ""));

    let err = service.analyze("text", Some("bad")).unwrap_err();

    assert_eq!(err, AnalysisError::AuthFailed { status });
}

#[test]
fn given_429_when_analyze_then_rate_limited() {
    let service = ClassifierService::new(MockTransport::replying(429, r#"{"error":"slow down"}"#));

    let err = service.analyze("text", None).unwrap_err();

    assert_eq!(err, AnalysisError::RateLimited);
}

#[test]
fn given_500_with_error_body_when_analyze_then_service_error_carries_message() {
    let service =
        ClassifierService::new(MockTransport::replying(500, r#"{"error":"Internal failure"}"#));

    let err = service.analyze("text", None).unwrap_err();

    match err {
        AnalysisError::ServiceError { status, detail } => {
            assert_eq!(status, 500);
            assert!(detail.contains("Internal failure"), "{detail}");
        }
        other => panic!("expected ServiceError, got {other:?}"),
    }
}

#[rstest]
#[case::not_json("<html>oops</html>")]
#[case::empty_list("[]")]
#[case::no_score(r#"[[{"label":"POSITIVE"}]]"#)]
#[case::no_label(r#"[[{"score":0.9}]]"#)]
fn given_unusable_body_when_analyze_then_unexpected_shape(#[case] body: &str) {
    let service = ClassifierService::new(MockTransport::replying(200, body));

    let err = service.analyze("text", None).unwrap_err();

    assert!(matches!(err, AnalysisError::UnexpectedShape(_)), "{err:?}");
}

#[test]
fn given_transport_failure_when_analyze_then_network_failure() {
    let service = ClassifierService::new(MockTransport::failing(io::ErrorKind::ConnectionRefused));

    let err = service.analyze("text", None).unwrap_err();

    assert!(matches!(err, AnalysisError::NetworkFailure(_)), "{err:?}");
}
