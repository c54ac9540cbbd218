//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::api::types::Category;
use crate::filters;
use crate::state::AppState;

/// Category display data for templates.
#[derive(Clone)]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
    /// Empty when the backend has no image for the category.
    pub image_url: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.as_i64(),
            name: category.name.clone(),
            image_url: category.image_url.clone().unwrap_or_default(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home/index.html")]
pub struct HomeTemplate {
    pub categories: Vec<CategoryView>,
    pub error: Option<String>,
}

/// Display the home page (category grid).
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    match state.api().get_categories().await {
        Ok(categories) => HomeTemplate {
            categories: categories.iter().map(CategoryView::from).collect(),
            error: None,
        },
        Err(e) => {
            tracing::warn!("Failed to fetch categories: {e}");
            HomeTemplate {
                categories: Vec::new(),
                error: Some("Could not load categories. Please try again later.".to_string()),
            }
        }
    }
}
