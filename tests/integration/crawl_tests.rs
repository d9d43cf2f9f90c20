//! Integration tests for the crawl pipeline
//!
//! These tests run the full coordinator/worker pipeline with a canned
//! renderer (no browser) and a wiremock LLM endpoint, covering the
//! end-to-end scenarios: heuristic-only crawls, LLM escalation, failure
//! isolation, and the fail-closed validation policy.

use async_trait::async_trait;
use spider_recon::config::{
    CategoryEntry, ClassifierConfig, Config, OutputConfig, RendererConfig,
};
use spider_recon::crawler::Coordinator;
use spider_recon::render::PageRenderer;
use spider_recon::validator::{BatchValidator, HttpLlmClient};
use spider_recon::{CrawlWarning, RenderError};
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renderer test double serving canned HTML per category URL
///
/// URLs with no entry fail with a timeout, standing in for a page that
/// never finished loading.
struct FakeRenderer {
    pages: HashMap<String, String>,
}

impl FakeRenderer {
    fn new(pages: &[(&str, &str)]) -> Arc<Self> {
        Arc::new(Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
        })
    }
}

#[async_trait]
impl PageRenderer for FakeRenderer {
    async fn render(&self, url: &Url) -> Result<String, RenderError> {
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| RenderError::Timeout {
                url: url.to_string(),
            })
    }
}

/// Builds a crawl configuration pointing the classifier at the mock server
fn create_test_config(categories: &[&str], api_base_url: &str) -> Config {
    Config {
        renderer: RendererConfig {
            scroll_count: 1,
            scroll_wait_ms: 10,
            initial_wait_ms: 10,
            page_timeout_ms: 5000,
            max_sessions: 4,
            chromium_path: None,
        },
        classifier: ClassifierConfig {
            api_base_url: api_base_url.to_string(),
            model: "test-model".to_string(),
            batch_size: 10,
            request_timeout_ms: 5000,
            api_key: Some("test-key".to_string()),
        },
        output: OutputConfig {
            results_path: "./products.json".to_string(),
        },
        categories: categories
            .iter()
            .map(|url| CategoryEntry {
                url: url.to_string(),
            })
            .collect(),
    }
}

/// Builds a coordinator over the fake renderer and a real HTTP LLM client
/// talking to the mock server
fn coordinator(config: Config, renderer: Arc<FakeRenderer>) -> Coordinator {
    let client = HttpLlmClient::new(&config.classifier).expect("failed to build LLM client");
    let batch_size = config.classifier.batch_size as usize;
    let validator = Arc::new(BatchValidator::new(Arc::new(client), batch_size));
    Coordinator::with_capabilities(config, renderer, validator)
}

/// One chat-completions response with the given content
fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

#[tokio::test]
async fn test_heuristic_only_crawl_makes_no_llm_call() {
    // Scenario A: a product-path link and an excluded link; the LLM must
    // never be consulted.
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("1. YES")))
        .expect(0) // Should never be called
        .mount(&mock_server)
        .await;

    let category = "https://shop.example.com/shoes";
    let html = r#"
        <html><body>
            <a href="/p/12345">Blue Runner</a>
            <a href="/login">Sign in</a>
        </body></html>
    "#;

    let config = create_test_config(&[category], &mock_server.uri());
    let renderer = FakeRenderer::new(&[(category, html)]);

    let result = coordinator(config, renderer).run().await.expect("crawl failed");

    assert_eq!(
        result.products(category),
        Some(&["https://shop.example.com/p/12345".to_string()][..])
    );
    assert!(result.warnings().is_empty());
}

#[tokio::test]
async fn test_product_tile_class_decides_without_llm() {
    // Scenario B: ambiguous URL but decisive DOM context
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("1. YES")))
        .expect(0) // Should never be called
        .mount(&mock_server)
        .await;

    let category = "https://shop.example.com/gadgets";
    let html = r#"
        <html><body>
            <div class="product-card">
                <a href="/item/xyz">Gadget</a>
            </div>
        </body></html>
    "#;

    let config = create_test_config(&[category], &mock_server.uri());
    let renderer = FakeRenderer::new(&[(category, html)]);

    let result = coordinator(config, renderer).run().await.expect("crawl failed");

    assert_eq!(
        result.products(category),
        Some(&["https://shop.example.com/item/xyz".to_string()][..])
    );
}

#[tokio::test]
async fn test_ambiguous_links_resolved_by_llm() {
    let mock_server = MockServer::start().await;

    // First ambiguous link is a product, second is not
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("1. YES\n2. NO")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let category = "https://shop.example.com/sale";
    let html = r#"
        <html><body>
            <a href="/spring-drop">Spring Drop</a>
            <a href="/size-guide">Size Guide</a>
        </body></html>
    "#;

    let config = create_test_config(&[category], &mock_server.uri());
    let renderer = FakeRenderer::new(&[(category, html)]);

    let result = coordinator(config, renderer).run().await.expect("crawl failed");

    assert_eq!(
        result.products(category),
        Some(&["https://shop.example.com/spring-drop".to_string()][..])
    );
}

#[tokio::test]
async fn test_duplicate_product_urls_emitted_once() {
    // Scenario C: two anchors resolve to the same product URL
    let mock_server = MockServer::start().await;

    let category = "https://shop.example.com/shoes";
    let html = r#"
        <html><body>
            <a href="/p/1"><img src="/thumb.jpg" alt="Runner"></a>
            <a href="https://shop.example.com/p/1">Blue Runner</a>
        </body></html>
    "#;

    let config = create_test_config(&[category], &mock_server.uri());
    let renderer = FakeRenderer::new(&[(category, html)]);

    let result = coordinator(config, renderer).run().await.expect("crawl failed");

    assert_eq!(
        result.products(category),
        Some(&["https://shop.example.com/p/1".to_string()][..])
    );
}

#[tokio::test]
async fn test_failed_render_isolated_from_other_categories() {
    // Scenario D: one category fails to render, the other succeeds
    let mock_server = MockServer::start().await;

    let failing = "https://shop.example.com/flaky";
    let healthy = "https://shop.example.com/shoes";
    let html = r#"
        <html><body>
            <a href="/p/1">One</a>
            <a href="/p/2">Two</a>
            <a href="/p/3">Three</a>
        </body></html>
    "#;

    let config = create_test_config(&[failing, healthy], &mock_server.uri());
    // No entry for the failing category: its render times out
    let renderer = FakeRenderer::new(&[(healthy, html)]);

    let result = coordinator(config, renderer).run().await.expect("crawl failed");

    assert_eq!(result.products(failing), Some(&[][..]));
    assert_eq!(
        result.products(healthy),
        Some(&[
            "https://shop.example.com/p/1".to_string(),
            "https://shop.example.com/p/2".to_string(),
            "https://shop.example.com/p/3".to_string(),
        ][..])
    );
    assert!(result
        .warnings()
        .iter()
        .any(|w| matches!(w, CrawlWarning::RenderFailure { category, .. } if category == failing)));
}

#[tokio::test]
async fn test_llm_failure_fails_closed() {
    let mock_server = MockServer::start().await;

    // The remote classifier is down
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let category = "https://shop.example.com/sale";
    let html = r#"
        <html><body>
            <a href="/p/1">Runner</a>
            <a href="/maybe-one">Maybe One</a>
            <a href="/maybe-two">Maybe Two</a>
        </body></html>
    "#;

    let config = create_test_config(&[category], &mock_server.uri());
    let renderer = FakeRenderer::new(&[(category, html)]);

    let result = coordinator(config, renderer).run().await.expect("crawl failed");

    // Exactly zero of the ambiguous links survive; heuristic products do
    assert_eq!(
        result.products(category),
        Some(&["https://shop.example.com/p/1".to_string()][..])
    );
    assert!(result
        .warnings()
        .iter()
        .any(|w| matches!(w, CrawlWarning::ValidatorFailure { urls, .. } if urls.len() == 2)));
}

#[tokio::test]
async fn test_missing_verdict_line_fails_closed_with_warning() {
    let mock_server = MockServer::start().await;

    // Two ambiguous links submitted, only one verdict line comes back
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("1. YES")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let category = "https://shop.example.com/sale";
    let html = r#"
        <html><body>
            <a href="/maybe-one">Maybe One</a>
            <a href="/maybe-two">Maybe Two</a>
        </body></html>
    "#;

    let config = create_test_config(&[category], &mock_server.uri());
    let renderer = FakeRenderer::new(&[(category, html)]);

    let result = coordinator(config, renderer).run().await.expect("crawl failed");

    assert_eq!(
        result.products(category),
        Some(&["https://shop.example.com/maybe-one".to_string()][..])
    );
    assert!(result.warnings().iter().any(|w| matches!(
        w,
        CrawlWarning::ClassificationParse { url, .. }
            if url == "https://shop.example.com/maybe-two"
    )));
}

#[tokio::test]
async fn test_multiple_categories_merge_independently() {
    let mock_server = MockServer::start().await;

    let shoes = "https://shop.example.com/shoes";
    let bags = "https://shop.example.com/bags";
    let shoes_html = r#"<html><body><a href="/p/10">Shoe</a></body></html>"#;
    let bags_html = r#"<html><body><a href="/p/20">Bag</a><a href="/p/21">Tote</a></body></html>"#;

    let config = create_test_config(&[shoes, bags], &mock_server.uri());
    let renderer = FakeRenderer::new(&[(shoes, shoes_html), (bags, bags_html)]);

    let result = coordinator(config, renderer).run().await.expect("crawl failed");

    assert_eq!(result.categories().len(), 2);
    assert_eq!(
        result.products(shoes),
        Some(&["https://shop.example.com/p/10".to_string()][..])
    );
    assert_eq!(
        result.products(bags),
        Some(&[
            "https://shop.example.com/p/20".to_string(),
            "https://shop.example.com/p/21".to_string(),
        ][..])
    );
}
