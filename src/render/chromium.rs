//! Chromium-backed renderer built on chromiumoxide.

use crate::config::RendererConfig;
use crate::render::PageRenderer;
use crate::RenderError;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use url::Url;

/// Renderer driving a single headless Chromium instance
///
/// One browser serves the whole crawl; concurrent workers queue FIFO on a
/// semaphore sized by `max-sessions`, each holding one page for the duration
/// of its render.
pub struct ChromiumRenderer {
    browser: Browser,
    sessions: Arc<Semaphore>,
    config: RendererConfig,
}

impl ChromiumRenderer {
    /// Launches headless Chromium and prepares the session pool
    ///
    /// # Arguments
    ///
    /// * `config` - Renderer configuration (scroll behavior, timeouts,
    ///   session limit, optional executable path)
    ///
    /// # Returns
    ///
    /// * `Ok(ChromiumRenderer)` - Browser launched and ready
    /// * `Err(RenderError)` - The browser could not be started
    pub async fn launch(config: &RendererConfig) -> Result<Self, RenderError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if let Some(path) = &config.chromium_path {
            builder = builder.chrome_executable(std::path::PathBuf::from(path));
        }

        let browser_config = builder
            .build()
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        // Drain CDP events for the lifetime of the browser
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            sessions: Arc::new(Semaphore::new(config.max_sessions as usize)),
            config: config.clone(),
        })
    }

    /// Navigates, scrolls to the bottom until the page stops growing, and
    /// serializes the DOM
    async fn render_on_page(&self, page: &Page, url: &Url) -> Result<String, RenderError> {
        let url_str = url.as_str();

        let navigation = tokio::time::timeout(
            Duration::from_millis(self.config.page_timeout_ms),
            page.goto(url_str),
        )
        .await;

        match navigation {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(RenderError::Navigation {
                    url: url_str.to_string(),
                    message: e.to_string(),
                })
            }
            Err(_) => {
                return Err(RenderError::Timeout {
                    url: url_str.to_string(),
                })
            }
        }

        // Give the initial viewport time to populate
        tokio::time::sleep(Duration::from_millis(self.config.initial_wait_ms)).await;

        let mut last_height = self.scroll_height(page, url_str).await?;

        for pass in 0..self.config.scroll_count {
            page.evaluate("window.scrollTo(0, document.body.scrollHeight);")
                .await
                .map_err(|e| RenderError::Dom {
                    url: url_str.to_string(),
                    message: e.to_string(),
                })?;

            tokio::time::sleep(Duration::from_millis(self.config.scroll_wait_ms)).await;

            let new_height = self.scroll_height(page, url_str).await?;
            if new_height == last_height {
                tracing::debug!(
                    "Page height stable after {} scroll pass(es) for {}",
                    pass + 1,
                    url_str
                );
                break;
            }
            last_height = new_height;
        }

        page.content().await.map_err(|e| RenderError::Dom {
            url: url_str.to_string(),
            message: e.to_string(),
        })
    }

    async fn scroll_height(&self, page: &Page, url_str: &str) -> Result<i64, RenderError> {
        let result = page
            .evaluate("document.body.scrollHeight")
            .await
            .map_err(|e| RenderError::Dom {
                url: url_str.to_string(),
                message: e.to_string(),
            })?;

        result.into_value::<i64>().map_err(|e| RenderError::Dom {
            url: url_str.to_string(),
            message: format!("scrollHeight was not a number: {:?}", e),
        })
    }
}

#[async_trait]
impl PageRenderer for ChromiumRenderer {
    async fn render(&self, url: &Url) -> Result<String, RenderError> {
        // FIFO queue for a browser session
        let _permit = self
            .sessions
            .acquire()
            .await
            .map_err(|_| RenderError::Launch("session pool closed".to_string()))?;

        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Navigation {
                url: url.to_string(),
                message: format!("failed to open page: {}", e),
            })?;

        let result = self.render_on_page(&page, url).await;

        let _ = page.close().await;

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RendererConfig;

    fn test_config() -> RendererConfig {
        RendererConfig {
            scroll_count: 2,
            scroll_wait_ms: 100,
            initial_wait_ms: 100,
            page_timeout_ms: 10_000,
            max_sessions: 1,
            chromium_path: None,
        }
    }

    #[tokio::test]
    #[ignore] // Requires a local Chromium installation
    async fn test_render_static_page() {
        let renderer = ChromiumRenderer::launch(&test_config())
            .await
            .expect("failed to launch browser");

        let url = Url::parse("data:text/html,<a href=\"/p/1\">One</a>").unwrap();
        let html = renderer.render(&url).await.expect("render failed");
        assert!(html.contains("/p/1"));
    }
}
