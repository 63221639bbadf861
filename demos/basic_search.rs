//! Basic search example.
//!
//! This example shows how to search for a meal and print its recipe.
//!
//! Run with: `cargo run --example basic_search -- Arrabiata`

use mealdb::ClientBuilder;

#[tokio::main]
async fn main() -> Result<(), mealdb::Error> {
    // MEALDB_API_KEY falls back to the public test key
    let client = ClientBuilder::from_env().build()?;

    let query = std::env::args().nth(1).unwrap_or_else(|| "Arrabiata".into());
    let meals = client.search_meals(&query).await?;

    let Some(meal) = meals.get(0) else {
        println!("No meals found for {query:?}");
        return Ok(());
    };

    println!("{} ({})", meal.name, meal.area.as_deref().unwrap_or("unknown area"));
    for item in meal.ingredients() {
        println!("  - {} {}", item.measure, item.name);
    }

    let tags = meal.tags();
    if !tags.is_empty() {
        println!("Tags: {}", tags.join(", "));
    }

    Ok(())
}
