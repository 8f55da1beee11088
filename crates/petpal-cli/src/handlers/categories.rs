//! Categories command handler.

use petpal_core::{Category, Species};

use crate::error::CliError;

/// Print the filter categories offered for `species`.
pub fn execute(species: &str) -> Result<(), CliError> {
    let species = Species::parse(species).ok_or_else(|| {
        CliError::Arguments(format!("Unknown species '{species}' (expected dog, cat or other)"))
    })?;

    println!("Categories for {species}:");
    for category in Category::available_for(species) {
        println!("  {:<12} {}", category.as_str().to_ascii_lowercase(), category.label());
    }
    Ok(())
}
