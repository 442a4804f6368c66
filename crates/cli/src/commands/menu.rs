//! Catalog listing.

use std::io::Write;

use marmita_storefront::{Catalog, StorefrontConfig};
use tracing::info;

/// Print every product with its formatted price and tags.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or stdout is closed.
pub fn list(config: &StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::load(&config.catalog_path)?;
    info!(products = catalog.len(), "Listing menu");

    let mut out = std::io::stdout().lock();
    write_menu(&mut out, &catalog)?;
    Ok(())
}

fn write_menu(out: &mut impl Write, catalog: &Catalog) -> std::io::Result<()> {
    for product in catalog.iter() {
        write!(
            out,
            "{:<6} {:<32} {:>12}",
            product.id.as_str(),
            product.name,
            product.price.to_string()
        )?;
        if product.tags.is_empty() {
            writeln!(out)?;
        } else {
            writeln!(out, "  [{}]", product.tags)?;
        }
    }
    Ok(())
}
