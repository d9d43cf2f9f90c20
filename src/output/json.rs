use crate::output::CrawlResult;
use crate::SpiderError;
use std::path::Path;

/// Writes the crawl's terminal artifact
///
/// The artifact is the plain category -> product-URLs mapping as pretty
/// JSON. Values keep discovery order; keys are serialized sorted so the
/// artifact is stable across runs with the same content.
///
/// # Arguments
///
/// * `result` - The completed crawl result
/// * `path` - File path the JSON is written to
///
/// # Returns
///
/// * `Ok(())` - Artifact written
/// * `Err(SpiderError)` - Serialization or file IO failed
pub fn write_results(result: &CrawlResult, path: &Path) -> Result<(), SpiderError> {
    let json = serde_json::to_string_pretty(result.categories())?;
    std::fs::write(path, json)?;
    tracing::info!("Results written to {}", path.display());
    Ok(())
}
