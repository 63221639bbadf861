//! Main MealDB client implementation.

use crate::error::{Error, Result};
use crate::types::*;
use crate::version::build_user_agent;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// Host serving both the JSON API and the ingredient images.
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com";

/// Public developer key accepted by the free tier.
pub const TEST_API_KEY: &str = "1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Length of the placeholder array `latest.php` returns without a subscription.
const SUBSCRIPTION_PLACEHOLDER_LEN: usize = 3;

/// Builder for constructing a [`Client`].
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent_suffix: Option<String>,
    image_dir: PathBuf,
}

impl ClientBuilder {
    /// Create a new client builder with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent_suffix: None,
            image_dir: PathBuf::from("."),
        }
    }

    /// Create a builder from `MEALDB_API_KEY` and `MEALDB_BASE_URL`.
    ///
    /// Falls back to [`TEST_API_KEY`] and [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        let api_key = std::env::var("MEALDB_API_KEY").unwrap_or_else(|_| TEST_API_KEY.into());
        let builder = Self::new(api_key);
        match std::env::var("MEALDB_BASE_URL") {
            Ok(url) if !url.is_empty() => builder.base_url(url),
            _ => builder,
        }
    }

    /// Set the host root. The JSON API lives under `/api/json/v1/{key}`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom User-Agent suffix.
    pub fn user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    /// Directory ingredient images are written to. Defaults to the working
    /// directory.
    pub fn image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = dir.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let api_key = self.api_key.trim();
        if api_key.is_empty() {
            return Err(Error::Config("API key is required".into()));
        }
        if api_key.contains('/') {
            return Err(Error::Config("API key must not contain '/'".into()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }

        let base_url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {}: {e}", self.base_url)))?;

        if !self.base_url.starts_with("https://") {
            warn!(
                base_url = %self.base_url,
                "API base URL is not using HTTPS. This is insecure."
            );
        }

        let user_agent = build_user_agent(self.user_agent_suffix.as_deref());
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&user_agent)
                .map_err(|_| Error::Config(format!("invalid User-Agent: {user_agent}")))?,
        );

        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Client {
            api_url: format!("{}/api/json/v1/{}", self.base_url, api_key),
            base_url,
            http_client,
            image_dir: self.image_dir,
        })
    }
}

/// The MealDB API client.
///
/// Each method performs exactly one GET (except [`Client::list_all`]) and
/// never retries.
///
/// # Example
///
/// ```rust,no_run
/// use mealdb::{Client, TEST_API_KEY};
///
/// #[tokio::main]
/// async fn main() -> Result<(), mealdb::Error> {
///     let client = Client::builder(TEST_API_KEY).build()?;
///
///     let seafood = client.filter_by_category("Seafood").await?;
///     for name in seafood.names() {
///         println!("{name}");
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    api_url: String,
    base_url: reqwest::Url,
    http_client: reqwest::Client,
    image_dir: PathBuf,
}

impl Client {
    /// Create a new client builder.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Root of the JSON API, including the API key.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // === Meals ===

    /// Search meals by name, e.g. `"Arrabiata"`.
    pub async fn search_meals(&self, name: &str) -> Result<MealDetails> {
        self.get_list("search.php", &[("s", name)], "meals").await
    }

    /// Look up a meal by ID, e.g. `"52772"`.
    pub async fn lookup_meal(&self, id: &str) -> Result<MealDetails> {
        self.get_list("lookup.php", &[("i", id)], "meals").await
    }

    /// A single random meal.
    pub async fn random_meal(&self) -> Result<MealDetails> {
        self.get_list("random.php", &[], "meals").await
    }

    /// All meals whose name starts with `letter`.
    pub async fn meals_by_first_letter(&self, letter: &str) -> Result<MealDetails> {
        self.get_list("search.php", &[("f", letter)], "meals").await
    }

    /// The most recently added meals.
    ///
    /// Without a paid key the API answers with a three-element placeholder
    /// array, reported here as [`Error::SubscriptionRequired`].
    pub async fn latest_meals(&self) -> Result<MealDetails> {
        let body = self.get_json("latest.php", &[]).await?;
        if is_subscription_placeholder(&body) {
            warn!("latest.php returned the subscription placeholder");
            return Err(Error::SubscriptionRequired);
        }
        MealDetails::from_response(body, "meals")
    }

    // === Lists ===

    /// All categories with ID, thumbnail and description.
    pub async fn meal_categories(&self) -> Result<CategoryList> {
        self.get_list("categories.php", &[], "categories").await
    }

    /// Category names only.
    pub async fn category_names(&self) -> Result<CategoryList> {
        self.get_list("list.php", &[("c", "list")], "meals").await
    }

    /// All areas (cuisines).
    pub async fn areas(&self) -> Result<AreaList> {
        self.get_list("list.php", &[("a", "list")], "meals").await
    }

    /// All ingredients.
    pub async fn ingredients(&self) -> Result<IngredientList> {
        self.get_list("list.php", &[("i", "list")], "meals").await
    }

    /// Category names, areas and ingredients in three sequential calls.
    pub async fn list_all(&self) -> Result<Catalog> {
        Ok(Catalog {
            categories: self.category_names().await?,
            areas: self.areas().await?,
            ingredients: self.ingredients().await?,
        })
    }

    // === Filters ===

    /// Meals using a main ingredient, e.g. `"chicken_breast"`.
    pub async fn filter_by_ingredient(&self, ingredient: &str) -> Result<MealList> {
        self.get_list("filter.php", &[("i", ingredient)], "meals").await
    }

    /// Meals in a category, e.g. `"Seafood"`.
    pub async fn filter_by_category(&self, category: &str) -> Result<MealList> {
        self.get_list("filter.php", &[("c", category)], "meals").await
    }

    /// Meals from an area, e.g. `"Canadian"`.
    pub async fn filter_by_area(&self, area: &str) -> Result<MealList> {
        self.get_list("filter.php", &[("a", area)], "meals").await
    }

    // === Images ===

    /// Remote URL of an ingredient image.
    ///
    /// The name is percent-encoded as a single path segment. Names that are
    /// blank or contain `/`, `\` or `..` are rejected.
    pub fn image_url(&self, ingredient: &str, size: ImageSize) -> Result<String> {
        validate_ingredient_name(ingredient)?;
        let file = remote_image_name(ingredient, size);

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("base URL cannot hold a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["images", "ingredients", file.as_str()]);
        Ok(url.into())
    }

    /// Download an ingredient image into the configured image directory.
    ///
    /// The file is named by [`image_file_name`]. Returns `Ok(false)` without
    /// writing anything when the server sends an empty body.
    pub async fn ingredient_image(&self, ingredient: &str, size: ImageSize) -> Result<bool> {
        let url = self.image_url(ingredient, size)?;
        let label = remote_image_name(ingredient, size);
        let response = self.send(&url, &label, &[]).await?;
        let bytes = response.bytes().await.map_err(Error::from_transport)?;

        if bytes.is_empty() {
            warn!(ingredient = ingredient, "Image response had an empty body");
            return Ok(false);
        }

        let path = self.image_dir.join(image_file_name(ingredient, size));
        tokio::fs::write(&path, &bytes).await?;
        debug!(path = %path.display(), bytes = bytes.len(), "Saved ingredient image");
        Ok(true)
    }

    // === Internal methods ===

    async fn get_list<T: ListItem>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        key: &str,
    ) -> Result<ResponseList<T>> {
        let body = self.get_json(endpoint, query).await?;
        ResponseList::from_response(body, key)
    }

    async fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}/{}", self.api_url, endpoint);
        let response = self.send(&url, endpoint, query).await?;
        let bytes = response.bytes().await.map_err(Error::from_transport)?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET `url`. Only `endpoint` is logged or put into errors; `url` carries
    /// the API key.
    async fn send(
        &self,
        url: &str,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        let response = self
            .http_client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::from_transport)?;

        let status = response.status();
        debug!(endpoint = endpoint, status = %status, "GET");

        if !status.is_success() {
            return Err(Error::from_response(response, endpoint).await);
        }

        Ok(response)
    }
}

fn remote_image_name(ingredient: &str, size: ImageSize) -> String {
    format!("{}{}.png", ingredient, size.remote_suffix())
}

fn validate_ingredient_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || name.contains(['/', '\\', '\0']) || name.contains("..") {
        return Err(Error::InvalidInput(format!(
            "ingredient name {name:?} cannot be used as a file name"
        )));
    }
    Ok(())
}

/// Local file name for an ingredient image: `{name}.png` or `{name}-small.png`.
pub fn image_file_name(ingredient: &str, size: ImageSize) -> String {
    format!("{}{}.png", ingredient, size.local_suffix())
}

fn is_subscription_placeholder(body: &Value) -> bool {
    body.get("meals")
        .and_then(Value::as_array)
        .is_some_and(|meals| meals.len() == SUBSCRIPTION_PLACEHOLDER_LEN)
}
