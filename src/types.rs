//! API types for the MealDB client.
//!
//! Every endpoint answers with a JSON object holding a single array under a
//! fixed key (`meals` or `categories`). [`ResponseList`] wraps that array and
//! the per-kind `impl` blocks below add the projections each list supports.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

/// Number of numbered ingredient/measure slots on a meal record.
pub const MAX_INGREDIENTS: usize = 20;

/// Records that can be carried by a [`ResponseList`].
pub trait ListItem: DeserializeOwned {
    /// Name used when the list is displayed.
    const LIST_NAME: &'static str;
}

/// Read-only typed view over the array returned by one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseList<T> {
    items: Vec<T>,
}

impl<T: ListItem> ResponseList<T> {
    /// Build a list from a decoded response body.
    ///
    /// A missing or `null` key yields an empty list. The value under the key
    /// must otherwise be an array of `T`.
    pub fn from_response(body: Value, key: &str) -> Result<Self> {
        let value = match body {
            Value::Object(mut map) => map.remove(key),
            _ => None,
        };

        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(v) => Ok(Self {
                items: serde_json::from_value(v)?,
            }),
        }
    }
}

impl<T> ResponseList<T> {
    /// Wrap already decoded records.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the API returned no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterate over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Borrow the records as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Take ownership of the records.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for ResponseList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Index<usize> for ResponseList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IntoIterator for ResponseList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResponseList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: ListItem> fmt::Display for ResponseList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(count={})", T::LIST_NAME, self.items.len())
    }
}

/// Meal summaries returned by the filter endpoints.
pub type MealList = ResponseList<MealSummary>;

/// Full meal records returned by search, lookup, random and latest.
pub type MealDetails = ResponseList<Meal>;

/// Categories, either full detail or names only.
pub type CategoryList = ResponseList<Category>;

/// Areas (cuisines).
pub type AreaList = ResponseList<Area>;

/// Ingredients.
pub type IngredientList = ResponseList<Ingredient>;

/// Short meal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealSummary {
    /// Meal ID.
    #[serde(rename = "idMeal")]
    pub id: String,
    /// Meal name.
    #[serde(rename = "strMeal")]
    pub name: String,
    /// Thumbnail URL.
    #[serde(rename = "strMealThumb")]
    pub thumbnail: String,
}

impl ListItem for MealSummary {
    const LIST_NAME: &'static str = "MealList";
}

impl ResponseList<MealSummary> {
    /// All meal IDs.
    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|m| m.id.as_str()).collect()
    }

    /// All meal names.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|m| m.name.as_str()).collect()
    }

    /// All thumbnail URLs.
    pub fn thumbnails(&self) -> Vec<&str> {
        self.iter().map(|m| m.thumbnail.as_str()).collect()
    }
}

/// Full meal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Meal ID.
    #[serde(rename = "idMeal")]
    pub id: String,
    /// Meal name.
    #[serde(rename = "strMeal")]
    pub name: String,
    /// Alternate meal name.
    #[serde(rename = "strMealAlternate")]
    pub alternate_name: Option<String>,
    /// Category name, e.g. `Vegetarian`.
    #[serde(rename = "strCategory")]
    pub category: Option<String>,
    /// Area (cuisine), e.g. `Italian`.
    #[serde(rename = "strArea")]
    pub area: Option<String>,
    /// Preparation instructions, usually with `\r\n` line breaks.
    #[serde(rename = "strInstructions")]
    pub instructions: Option<String>,
    /// Thumbnail URL.
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
    /// Raw comma-separated tags. See [`Meal::tags`].
    #[serde(rename = "strTags")]
    pub raw_tags: Option<String>,
    /// YouTube video URL.
    #[serde(rename = "strYoutube")]
    pub youtube: Option<String>,
    /// Original recipe URL.
    #[serde(rename = "strSource")]
    pub source: Option<String>,
    /// Credit for the meal image.
    #[serde(rename = "strImageSource")]
    pub image_source: Option<String>,
    /// Whether the image is confirmed Creative Commons.
    #[serde(rename = "strCreativeCommonsConfirmed")]
    pub creative_commons_confirmed: Option<String>,
    /// Last modification timestamp.
    #[serde(rename = "dateModified")]
    pub date_modified: Option<String>,
    /// Numbered `strIngredientN` / `strMeasureN` fields.
    #[serde(flatten)]
    slots: HashMap<String, Value>,
}

impl Meal {
    /// Ingredient/measure pairs, in slot order.
    ///
    /// A slot counts only when its ingredient is a non-blank string. A
    /// missing measure becomes an empty string.
    pub fn ingredients(&self) -> Vec<IngredientMeasure> {
        (1..=MAX_INGREDIENTS)
            .filter_map(|n| {
                let name = self.slot_text(&format!("strIngredient{n}"))?.trim();
                if name.is_empty() {
                    return None;
                }
                let measure = self
                    .slot_text(&format!("strMeasure{n}"))
                    .map(str::trim)
                    .unwrap_or("");
                Some(IngredientMeasure {
                    name: name.to_string(),
                    measure: measure.to_string(),
                })
            })
            .collect()
    }

    /// Tags split on commas with whitespace trimmed.
    pub fn tags(&self) -> Vec<String> {
        self.raw_tags
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn slot_text(&self, key: &str) -> Option<&str> {
        self.slots.get(key)?.as_str()
    }
}

impl ListItem for Meal {
    const LIST_NAME: &'static str = "MealDetails";
}

impl ResponseList<Meal> {
    /// All meal IDs.
    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|m| m.id.as_str()).collect()
    }

    /// All meal names.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|m| m.name.as_str()).collect()
    }

    /// Categories of meals that have one.
    pub fn categories(&self) -> Vec<&str> {
        self.iter().filter_map(|m| m.category.as_deref()).collect()
    }

    /// Areas of meals that have one.
    pub fn areas(&self) -> Vec<&str> {
        self.iter().filter_map(|m| m.area.as_deref()).collect()
    }

    /// Thumbnail URLs of meals that have one.
    pub fn thumbnails(&self) -> Vec<&str> {
        self.iter().filter_map(|m| m.thumbnail.as_deref()).collect()
    }

    /// Ingredients of the meal at `index`; empty when out of range.
    pub fn ingredients_of(&self, index: usize) -> Vec<IngredientMeasure> {
        self.get(index).map(Meal::ingredients).unwrap_or_default()
    }

    /// Tags of the meal at `index`; empty when out of range.
    pub fn tags_of(&self, index: usize) -> Vec<String> {
        self.get(index).map(Meal::tags).unwrap_or_default()
    }
}

/// One ingredient line of a meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientMeasure {
    /// Ingredient name.
    pub name: String,
    /// Quantity, possibly empty.
    pub measure: String,
}

/// Meal category.
///
/// `list.php?c=list` only fills `name`; `categories.php` fills everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    #[serde(rename = "idCategory")]
    pub id: Option<String>,
    /// Category name.
    #[serde(rename = "strCategory")]
    pub name: String,
    /// Thumbnail URL.
    #[serde(rename = "strCategoryThumb")]
    pub thumbnail: Option<String>,
    /// Description.
    #[serde(rename = "strCategoryDescription")]
    pub description: Option<String>,
}

impl ListItem for Category {
    const LIST_NAME: &'static str = "CategoryList";
}

impl ResponseList<Category> {
    /// All category names.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Geographical area or cuisine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    /// Area name.
    #[serde(rename = "strArea")]
    pub name: String,
}

impl ListItem for Area {
    const LIST_NAME: &'static str = "AreaList";
}

impl ResponseList<Area> {
    /// All area names.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|a| a.name.as_str()).collect()
    }
}

/// Ingredient known to the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient ID.
    #[serde(rename = "idIngredient")]
    pub id: Option<String>,
    /// Ingredient name.
    #[serde(rename = "strIngredient")]
    pub name: String,
    /// Description.
    #[serde(rename = "strDescription")]
    pub description: Option<String>,
    /// Ingredient type, e.g. `Meat`.
    #[serde(rename = "strType")]
    pub kind: Option<String>,
    /// Thumbnail URL.
    #[serde(rename = "strThumb")]
    pub thumbnail: Option<String>,
}

impl ListItem for Ingredient {
    const LIST_NAME: &'static str = "IngredientList";
}

impl ResponseList<Ingredient> {
    /// All ingredient names.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|i| i.name.as_str()).collect()
    }
}

/// Every category, area and ingredient name, fetched together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// Category names.
    pub categories: CategoryList,
    /// Areas.
    pub areas: AreaList,
    /// Ingredients.
    pub ingredients: IngredientList,
}

/// Ingredient image variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    /// Full-size image.
    #[default]
    Large,
    /// Thumbnail-size image.
    Small,
}

impl ImageSize {
    /// Suffix the image host uses before `.png`.
    pub(crate) fn remote_suffix(self) -> &'static str {
        match self {
            ImageSize::Large => "",
            ImageSize::Small => "-Small",
        }
    }

    /// Suffix used for the local file before `.png`.
    pub(crate) fn local_suffix(self) -> &'static str {
        match self {
            ImageSize::Large => "",
            ImageSize::Small => "-small",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn arrabiata() -> Value {
        json!({
            "idMeal": "52771",
            "strMeal": "Spicy Arrabiata Penne",
            "strMealAlternate": null,
            "strCategory": "Vegetarian",
            "strArea": "Italian",
            "strInstructions": "Bring a large pot of water to a boil.",
            "strMealThumb": "https://www.themealdb.com/images/media/meals/ustsqw1468250014.jpg",
            "strTags": "Pasta,Curry",
            "strYoutube": "https://www.youtube.com/watch?v=1IszT_guI08",
            "strIngredient1": "penne rigate",
            "strIngredient2": "olive oil",
            "strIngredient3": " garlic ",
            "strIngredient4": "",
            "strIngredient5": null,
            "strMeasure1": "1 pound",
            "strMeasure2": "1/4 cup",
            "strMeasure3": null,
            "strMeasure4": "",
            "strMeasure5": null,
            "strSource": null,
            "dateModified": null
        })
    }

    #[test]
    fn test_null_key_yields_empty_list() {
        let list = MealDetails::from_response(json!({"meals": null}), "meals").unwrap();
        assert!(list.is_empty());

        let list = CategoryList::from_response(json!({}), "categories").unwrap();
        assert_eq!(list.len(), 0);

        let list = MealList::from_response(Value::Null, "meals").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let result = MealList::from_response(json!({"meals": "Invalid ID"}), "meals");
        assert!(matches!(result, Err(crate::Error::Json(_))));
    }

    #[test]
    fn test_meal_list_projections() {
        let list = MealList::from_response(
            json!({"meals": [
                {"idMeal": "52959", "strMeal": "Baked salmon", "strMealThumb": "a.jpg"},
                {"idMeal": "52819", "strMeal": "Cajun spiced fish tacos", "strMealThumb": "b.jpg"}
            ]}),
            "meals",
        )
        .unwrap();

        assert_eq!(list.ids(), vec!["52959", "52819"]);
        assert_eq!(list.names(), vec!["Baked salmon", "Cajun spiced fish tacos"]);
        assert_eq!(list.thumbnails(), vec!["a.jpg", "b.jpg"]);
        assert_eq!(list.to_string(), "MealList(count=2)");
    }

    #[test]
    fn test_meal_ingredients_skip_blank_slots() {
        let meal: Meal = serde_json::from_value(arrabiata()).unwrap();
        let ingredients = meal.ingredients();

        assert_eq!(ingredients.len(), 3);
        assert_eq!(ingredients[0].name, "penne rigate");
        assert_eq!(ingredients[0].measure, "1 pound");
        assert_eq!(ingredients[2].name, "garlic");
        assert_eq!(ingredients[2].measure, "");
    }

    #[test]
    fn test_single_filled_slot() {
        let meal: Meal = serde_json::from_value(json!({
            "idMeal": "1",
            "strMeal": "Bread",
            "strIngredient1": "",
            "strIngredient2": "  ",
            "strIngredient3": "Flour",
            "strMeasure3": "2 cups",
            "strIngredient4": null
        }))
        .unwrap();

        assert_eq!(
            meal.ingredients(),
            vec![IngredientMeasure {
                name: "Flour".into(),
                measure: "2 cups".into(),
            }]
        );
    }

    #[test]
    fn test_tags_are_trimmed() {
        let meal: Meal = serde_json::from_value(json!({
            "idMeal": "1",
            "strMeal": "Penne",
            "strTags": "Spicy, Quick, Pasta"
        }))
        .unwrap();
        assert_eq!(meal.tags(), vec!["Spicy", "Quick", "Pasta"]);

        let untagged: Meal = serde_json::from_value(json!({
            "idMeal": "2",
            "strMeal": "Soup",
            "strTags": null
        }))
        .unwrap();
        assert!(untagged.tags().is_empty());
    }

    #[test]
    fn test_meal_serializes_with_api_field_names() {
        let meal: Meal = serde_json::from_value(arrabiata()).unwrap();
        let value = serde_json::to_value(&meal).unwrap();

        assert_eq!(value["idMeal"], "52771");
        assert_eq!(value["strArea"], "Italian");
        assert_eq!(value["strIngredient1"], "penne rigate");
        assert_eq!(value["strMeasure2"], "1/4 cup");
    }

    #[test]
    fn test_meal_details_projections() {
        let list = MealDetails::from_response(json!({"meals": [arrabiata()]}), "meals").unwrap();

        assert_eq!(list.ids(), vec!["52771"]);
        assert_eq!(list.names(), vec!["Spicy Arrabiata Penne"]);
        assert_eq!(list.categories(), vec!["Vegetarian"]);
        assert_eq!(list.areas(), vec!["Italian"]);
        assert_eq!(list.tags_of(0), vec!["Pasta", "Curry"]);
        assert_eq!(list.ingredients_of(0).len(), 3);
        assert_eq!(list[0].youtube.as_deref(), Some("https://www.youtube.com/watch?v=1IszT_guI08"));
    }

    #[test]
    fn test_projection_helpers_are_lenient_out_of_range() {
        let list = MealDetails::from_response(json!({"meals": [arrabiata()]}), "meals").unwrap();
        assert!(list.ingredients_of(5).is_empty());
        assert!(list.tags_of(5).is_empty());
        assert!(list.get(5).is_none());
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range_panics() {
        let list = MealDetails::from_response(json!({"meals": [arrabiata()]}), "meals").unwrap();
        let _ = &list[1];
    }

    #[test]
    fn test_category_forms() {
        let full = CategoryList::from_response(
            json!({"categories": [{
                "idCategory": "1",
                "strCategory": "Beef",
                "strCategoryThumb": "https://www.themealdb.com/images/category/beef.png",
                "strCategoryDescription": "Beef is the culinary name for meat from cattle."
            }]}),
            "categories",
        )
        .unwrap();
        assert_eq!(full[0].id.as_deref(), Some("1"));
        assert_eq!(full.names(), vec!["Beef"]);

        let names = CategoryList::from_response(
            json!({"meals": [{"strCategory": "Beef"}, {"strCategory": "Dessert"}]}),
            "meals",
        )
        .unwrap();
        assert_eq!(names.names(), vec!["Beef", "Dessert"]);
        assert!(names[1].description.is_none());
    }

    #[test]
    fn test_area_and_ingredient_names() {
        let areas =
            AreaList::from_response(json!({"meals": [{"strArea": "Canadian"}]}), "meals").unwrap();
        assert_eq!(areas.names(), vec!["Canadian"]);
        assert_eq!(areas.to_string(), "AreaList(count=1)");

        let ingredients = IngredientList::from_response(
            json!({"meals": [{
                "idIngredient": "1",
                "strIngredient": "Chicken",
                "strDescription": null,
                "strType": null
            }]}),
            "meals",
        )
        .unwrap();
        assert_eq!(ingredients.names(), vec!["Chicken"]);
        assert!(ingredients[0].kind.is_none());
    }

    #[test]
    fn test_image_size_suffixes() {
        assert_eq!(ImageSize::default(), ImageSize::Large);
        assert_eq!(ImageSize::Small.remote_suffix(), "-Small");
        assert_eq!(ImageSize::Small.local_suffix(), "-small");
        assert_eq!(ImageSize::Large.local_suffix(), "");
    }
}
