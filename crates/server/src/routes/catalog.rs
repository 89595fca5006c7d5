//! Public product listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::i18n::UiText;
use crate::middleware::OptionalAdmin;
use crate::state::AppState;

use super::ProductView;

/// Public listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogIndexTemplate {
    pub ui: &'static UiText,
    pub products: Vec<ProductView>,
    pub is_admin: bool,
}

/// Display every product, unfiltered and unpaginated.
///
/// GET /
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAdmin(admin): OptionalAdmin,
) -> Result<CatalogIndexTemplate> {
    let products = ProductRepository::new(state.pool())
        .list_all()
        .await?
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(CatalogIndexTemplate {
        ui: state.ui(),
        products,
        is_admin: admin.is_some(),
    })
}
