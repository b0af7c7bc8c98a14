use mockito::Matcher;
use recipe_lookup::{
    load_recipe, search_recipes, AppConfig, HttpRecipeSource, RecipeError, RecipeSource,
};

fn search_body(count: usize) -> String {
    let recipes: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "publisher": "Closet Cooking",
                "title": format!("Pizza {}", i),
                "source_url": format!("http://closetcooking.com/pizza-{}", i),
                "recipe_id": format!("{}", 35000 + i),
                "image_url": format!("http://forkify-api.herokuapp.com/images/{}.jpg", i),
                "social_rank": 99.99,
                "publisher_url": "http://closetcooking.com"
            })
        })
        .collect();
    serde_json::json!({ "count": count, "recipes": recipes }).to_string()
}

const RECIPE_BODY: &str = r#"
{
    "recipe": {
        "publisher": "101 Cookbooks",
        "ingredients": [
            "4 1/2 cups (20.25 ounces) unbleached high-gluten, bread, or all-purpose flour, chilled",
            "1 3/4 teaspoons salt",
            "1 teaspoon instant yeast",
            "1/4 cup olive oil (optional)",
            "1 3/4 cups water, ice cold (40&amp;#176;F)",
            "Semolina flour OR cornmeal for dusting"
        ],
        "source_url": "http://www.101cookbooks.com/archives/001199.html",
        "recipe_id": "47746",
        "image_url": "http://forkify-api.herokuapp.com/images/best_pizza_dough_recipe1b20.jpg",
        "social_rank": 100,
        "publisher_url": "http://www.101cookbooks.com",
        "title": "Best Pizza Dough Ever"
    }
}
"#;

fn source_for(server: &mockito::ServerGuard) -> HttpRecipeSource {
    HttpRecipeSource::new(server.url(), None).unwrap()
}

fn config_for(server: &mockito::ServerGuard) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = server.url();
    config
}

#[tokio::test]
async fn test_search_parses_results() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("q".into(), "pizza".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(search_body(3))
        .create_async()
        .await;

    let results = source_for(&server)
        .fetch_recipes_by_search_term("pizza")
        .await
        .unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].id, "35000");
    assert_eq!(results[0].title, "Pizza 0");
    assert_eq!(results[0].author, "Closet Cooking");
    assert!(results[2].img.ends_with("/2.jpg"));
}

#[tokio::test]
async fn test_recipe_by_id() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/get")
        .match_query(Matcher::UrlEncoded("rId".into(), "47746".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RECIPE_BODY)
        .create_async()
        .await;

    let data = source_for(&server).fetch_recipe_by_id("47746").await.unwrap();

    assert_eq!(data.id, "47746");
    assert_eq!(data.title, "Best Pizza Dough Ever");
    assert_eq!(data.author, "101 Cookbooks");
    assert_eq!(data.url, "http://www.101cookbooks.com/archives/001199.html");
    assert_eq!(data.ingredients.len(), 6);
    assert!(data.ingredients[4].contains("40°F"));
    assert_eq!(data.cooking_time, None);
}

#[tokio::test]
async fn test_http_error_status_is_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/get")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body("not found")
        .create_async()
        .await;

    let result = source_for(&server).fetch_recipe_by_id("nope").await;
    match result {
        Err(RecipeError::Fetch { status, .. }) => assert_eq!(status, Some(404)),
        other => panic!("Expected Fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_body_with_ok_status() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Couldn't find recipe with that query."}"#)
        .create_async()
        .await;

    let result = source_for(&server)
        .fetch_recipes_by_search_term("zzzz")
        .await;
    match result {
        Err(RecipeError::Fetch { status, message }) => {
            assert_eq!(status, Some(200));
            assert!(message.contains("Couldn't find recipe"));
        }
        other => panic!("Expected Fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_payload_is_fetch_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/get")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"recipe": {"title": 42}}"#)
        .create_async()
        .await;

    let result = source_for(&server).fetch_recipe_by_id("1").await;
    assert!(matches!(result, Err(RecipeError::Fetch { status: None, .. })));
}

#[tokio::test]
async fn test_search_recipes_returns_first_page() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("q".into(), "pasta".into()))
        .with_status(200)
        .with_body(search_body(23))
        .create_async()
        .await;

    let recipes = search_recipes(&config_for(&server), "pasta").await.unwrap();
    assert_eq!(recipes.len(), 10);
    assert_eq!(recipes[9].id, "35009");
}

#[tokio::test]
async fn test_load_recipe_derives_time_and_servings() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/get")
        .match_query(Matcher::UrlEncoded("rId".into(), "47746".into()))
        .with_status(200)
        .with_body(RECIPE_BODY)
        .create_async()
        .await;

    let recipe = load_recipe(&config_for(&server), "47746").await.unwrap();

    assert_eq!(recipe.cooking_time(), 90);
    assert_eq!(recipe.servings(), 4);

    let flour = &recipe.ingredients()[0];
    assert_eq!(flour.count, Some(4.5));
    assert_eq!(flour.unit, "cups");
    assert!(flour.ingredient.starts_with("unbleached high-gluten"));

    let oil = &recipe.ingredients()[3];
    assert_eq!(oil.count, Some(0.25));
    assert_eq!(oil.ingredient, "olive oil");

    let dusting = &recipe.ingredients()[5];
    assert_eq!(dusting.count, None);
}
