//! Console summary of a completed crawl

use crate::output::CrawlResult;

/// Prints a per-category summary and any accumulated warnings to stdout
///
/// # Arguments
///
/// * `result` - The completed crawl result
pub fn print_summary(result: &CrawlResult) {
    println!("=== Crawl Summary ===\n");

    for (category, products) in result.categories() {
        println!("  {} -> {} product URL(s)", category, products.len());
    }

    println!(
        "\nTotal: {} product URL(s) across {} categories",
        result.total_products(),
        result.categories().len()
    );

    let warnings = result.warnings();
    if !warnings.is_empty() {
        println!("\nWarnings ({}):", warnings.len());
        for warning in warnings {
            println!("  - {}", warning);
        }
    }
}
