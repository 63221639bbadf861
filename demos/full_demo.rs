//! Full client demo - walks through every endpoint
//!
//! Run with: cargo run --example full_demo

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use mealdb::{ClientBuilder, Error, ImageSize, DEFAULT_BASE_URL, SDK_VERSION, TEST_API_KEY};
use std::time::Duration;

const SEARCH_TERM: &str = "Arrabiata";
const IMAGE_INGREDIENT: &str = "Lime";

fn header(text: &str) {
    println!();
    println!("{}", format!(" {} ", text).on_blue().bold());
    println!();
}

fn subheader(text: &str) {
    println!("{} {}", "▸".blue().bold(), text.bold().blue());
}

fn info(label: &str, value: &str) {
    println!("  {}: {}", label.dimmed(), value);
}

fn success(text: &str) {
    println!("{} {}", "✔".green(), text);
}

fn warn(text: &str) {
    println!("{} {}", "⚠".yellow(), text);
}

fn preview(values: &[&str]) -> String {
    let shown: Vec<&str> = values.iter().take(5).copied().collect();
    if values.len() > shown.len() {
        format!("{}, … ({} total)", shown.join(", "), values.len())
    } else {
        shown.join(", ")
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    println!();
    println!("{}", "  MealDB Rust Client - Full Demo  ".magenta().bold());

    // ========== Configuration ==========
    header("Configuration");

    info("SDK Version", SDK_VERSION);
    let api_key = std::env::var("MEALDB_API_KEY").unwrap_or_else(|_| TEST_API_KEY.into());
    let base_url = std::env::var("MEALDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
    info("Base URL", &base_url);
    info("Timeout", "30s");

    let image_dir = std::env::temp_dir();
    let client = ClientBuilder::new(api_key)
        .base_url(&base_url)
        .image_dir(&image_dir)
        .user_agent_suffix("full-demo")
        .build()?;
    info("Image Dir", &image_dir.display().to_string());

    // ========== Search ==========
    header("Search");

    let pb = spinner(&format!("Searching for {SEARCH_TERM}..."));
    let meals = client.search_meals(SEARCH_TERM).await?;
    pb.finish_and_clear();
    success(&format!("{meals}"));

    if let Some(meal) = meals.get(0) {
        subheader(&meal.name);
        info("ID", &meal.id);
        info("Category", meal.category.as_deref().unwrap_or("-"));
        info("Area", meal.area.as_deref().unwrap_or("-"));
        info("Tags", &meal.tags().join(", "));
        for item in meal.ingredients() {
            println!("    {} {}", item.measure.dimmed(), item.name);
        }

        let pb = spinner("Looking the meal up by ID...");
        let by_id = client.lookup_meal(&meal.id).await?;
        pb.finish_and_clear();
        success(&format!("Lookup returned {}", preview(&by_id.names())));
    }

    // ========== Random & Latest ==========
    header("Random & Latest");

    let random = client.random_meal().await?;
    info("Random", &preview(&random.names()));

    match client.latest_meals().await {
        Ok(latest) => info("Latest", &preview(&latest.names())),
        Err(Error::SubscriptionRequired) => warn("Latest meals need a paid API key"),
        Err(e) => return Err(e),
    }

    let by_letter = client.meals_by_first_letter("b").await?;
    info("Starting with 'b'", &preview(&by_letter.names()));

    // ========== Lists ==========
    header("Lists");

    let pb = spinner("Fetching categories, areas and ingredients...");
    let categories = client.meal_categories().await?;
    let catalog = client.list_all().await?;
    pb.finish_and_clear();

    info("Categories", &preview(&categories.names()));
    info("Areas", &preview(&catalog.areas.names()));
    info("Ingredients", &preview(&catalog.ingredients.names()));

    // ========== Filters ==========
    header("Filters");

    let seafood = client.filter_by_category("Seafood").await?;
    info("Seafood", &preview(&seafood.names()));
    let canadian = client.filter_by_area("Canadian").await?;
    info("Canadian", &preview(&canadian.names()));
    let chicken = client.filter_by_ingredient("chicken_breast").await?;
    info("Chicken breast", &preview(&chicken.names()));

    // ========== Images ==========
    header("Ingredient Images");

    for size in [ImageSize::Large, ImageSize::Small] {
        let saved = client.ingredient_image(IMAGE_INGREDIENT, size).await?;
        let file = image_dir.join(mealdb::image_file_name(IMAGE_INGREDIENT, size));
        if saved {
            success(&format!("Saved {}", file.display()));
        } else {
            warn(&format!("Nothing saved for {}", client.image_url(IMAGE_INGREDIENT, size)?));
        }
    }

    println!();
    println!("{}", " Demo Complete ".on_green().bold());
    println!();

    Ok(())
}
