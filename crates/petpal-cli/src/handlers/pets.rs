//! Pets command handler.

use chrono::Local;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_age, print_separator, truncate_string};

/// List all pet profiles, marking the active one.
pub async fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let snapshot = ctx.app().pets().await;
    let today = Local::now().date_naive();

    println!(
        "  {:<10} {:<12} {:<6} {:<20} {:<9} {:<8} Reg. No.",
        "ID", "Name", "Type", "Breed", "Age", "Weight"
    );
    print_separator(84);

    for pet in &snapshot.pets {
        let marker = if pet.id == snapshot.active_id { '*' } else { ' ' };
        println!(
            "{marker} {:<10} {:<12} {:<6} {:<20} {:<9} {:<8} {}",
            truncate_string(pet.id.as_str(), 10),
            truncate_string(&pet.name, 12),
            pet.species,
            truncate_string(&pet.breed, 20),
            format_age(pet.age_years(today)),
            format!("{:.1}kg", pet.weight),
            pet.reg_number.as_deref().unwrap_or("--"),
        );
    }
    Ok(())
}
