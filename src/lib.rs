//! Rust client for TheMealDB.
//!
//! [TheMealDB](https://www.themealdb.com) is an open recipe database. Every
//! client method issues one GET against a fixed endpoint and returns the
//! response array wrapped in a typed [`ResponseList`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mealdb::{Client, TEST_API_KEY};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mealdb::Error> {
//!     let client = Client::builder(TEST_API_KEY).build()?;
//!
//!     let meals = client.search_meals("Arrabiata").await?;
//!     if let Some(meal) = meals.get(0) {
//!         println!("{} ({:?})", meal.name, meal.area);
//!         for item in meal.ingredients() {
//!             println!("  {} {}", item.measure, item.name);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;
mod version;

pub use client::{image_file_name, Client, ClientBuilder, DEFAULT_BASE_URL, TEST_API_KEY};
pub use error::{Error, Result};
pub use types::*;
pub use version::SDK_VERSION;
