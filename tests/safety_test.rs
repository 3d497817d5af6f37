//! Integration tests for the content safety gates.

use std::fmt;
use std::sync::{Arc, Mutex};

use api_guard::safety::{
    validate_content_security, validate_url_security, ContentGate, SafetyTables, UrlGate,
    INCOMPLETE_VALIDATION_WARNING,
};
use api_guard::{process_failure, Failure, FailureContext, GuardConfig};
use serde_json::json;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Records every event as its level plus `name=value` pairs.
#[derive(Clone, Default)]
struct CapturedEvents(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedEvents {
    fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    fn warnings(&self) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| *level == Level::WARN)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for CapturedEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = FieldText::default();
        event.record(&mut fields);
        self.0
            .lock()
            .unwrap()
            .push((*event.metadata().level(), fields.0));
    }
}

#[derive(Default)]
struct FieldText(String);

impl Visit for FieldText {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.push_str(&format!("{}={:?} ", field.name(), value));
    }
}

fn with_captured_events<R>(f: impl FnOnce() -> R) -> (R, CapturedEvents) {
    let events = CapturedEvents::default();
    let subscriber = tracing_subscriber::registry().with(events.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, events)
}

#[test]
fn allowlisted_platform_is_clean() {
    let verdict = UrlGate::builtin().evaluate("https://www.facebook.com/x");

    assert!(verdict.is_safe());
    assert!(verdict.warnings().is_empty());
}

#[test]
fn shortener_is_flagged_not_blocked() {
    let verdict = UrlGate::builtin().evaluate("http://bit.ly/abc");

    assert!(verdict.is_safe());
    assert!(!verdict.warnings().is_empty());
}

#[test]
fn casino_anywhere_blocks() {
    for url in [
        "https://casino.example/",
        "https://example.com/casino",
        "https://example.com/?ref=CASINO",
    ] {
        let verdict = UrlGate::builtin().evaluate(url);
        assert!(!verdict.is_safe(), "{}", url);
        assert!(!verdict.blocked_reasons().is_empty(), "{}", url);
    }
}

#[test]
fn malformed_url_never_fails() {
    for url in ["https://exa mple.com/%zz", "http://[::1", "%%%", ""] {
        let verdict = UrlGate::builtin().evaluate(url);
        assert!(
            verdict
                .warnings()
                .contains(&INCOMPLETE_VALIDATION_WARNING.to_string()),
            "{}: {:?}",
            url,
            verdict
        );
    }
}

#[test]
fn content_link_warnings_are_logged() {
    let (result, events) = with_captured_events(|| {
        UrlGate::builtin().validate_content_link("http://bit.ly/abc", true)
    });

    assert_eq!(result.unwrap(), "http://bit.ly/abc/");
    let warnings = events.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("URL security warnings"));
    assert!(warnings[0].contains("http://bit.ly/abc/"));
}

#[test]
fn clean_content_link_logs_nothing() {
    let (result, events) = with_captured_events(|| validate_url_security("https://example.com"));

    assert_eq!(result.unwrap(), "https://example.com/");
    assert!(events.warnings().is_empty());
}

#[test]
fn normalizer_emits_no_events() {
    let failures = [
        Failure::UpstreamHttp("connection reset".to_string()),
        Failure::Programming("missing attribute".to_string()),
        Failure::unhandled("boom"),
        Failure::validation("bad"),
        Failure::Throttled { wait: None },
    ];
    let context = FailureContext {
        view: Some("ContentLinkView".to_string()),
        request_id: Some("req-042".to_string()),
    };

    for failure in failures {
        let (_, events) = with_captured_events(|| process_failure(failure, &context));
        assert_eq!(events.len(), 0);
    }
}

#[test]
fn blocked_link_surfaces_as_validation_response() {
    let error = validate_url_security("https://free-porn.example").unwrap_err();
    let response = process_failure(Failure::from(error), &FailureContext::default());

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response.to_json()["errors"],
        json!(["URL blocked for security reasons: Blocked keyword detected: porn"])
    );
}

#[test]
fn text_gate_absent_input_is_safe() {
    let gate = ContentGate::builtin();

    for text in [None, Some("")] {
        let verdict = gate.evaluate(text);
        assert!(verdict.is_safe());
        assert!(verdict.warnings().is_empty());
        assert!(verdict.blocked_reasons().is_empty());
    }
    assert_eq!(validate_content_security(None), Ok(true));
}

#[test]
fn configured_tables_extend_builtins() {
    let cfg = GuardConfig::from_toml_str(
        r#"
        [url]
        extra_safe_domains = ["nestwash.app"]
        extra_blocked_keywords = ["lottery"]
        extra_suspicious_patterns = ['rb\.gy']
        max_path_depth = 3

        [content]
        extra_blocked_patterns = ['\b(lottery)\b']
        "#,
    )
    .unwrap();
    let tables = SafetyTables::from_config(&cfg).unwrap();
    let urls = UrlGate::new(&tables);
    let text = ContentGate::new(&tables);

    assert_eq!(urls.evaluate("https://nestwash.app/casino/"), Default::default());
    assert!(!urls.evaluate("https://lottery.example/").is_safe());
    assert!(!urls.evaluate("https://casino.example/").is_safe());
    assert!(urls
        .evaluate("https://rb.gy/abc")
        .warnings()
        .iter()
        .any(|w| w.contains(r"rb\.gy")));
    assert!(urls
        .evaluate("https://example.com/a/b/c/d")
        .warnings()
        .contains(&"Unusually deep URL path".to_string()));
    assert!(!text.evaluate(Some("Win the lottery")).is_safe());
    assert!(!text.evaluate(Some("Win at the casino")).is_safe());
}
