//! Admin panel route handlers.
//!
//! Every handler takes [`RequireAdmin`] as its first argument, so an anonymous
//! request is redirected to `/login` before anything else is read.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    response::Redirect,
};
use tower_sessions::Session;
use tracing::instrument;

use vitrine_core::{Price, ProductId, SanitizedFilename, StoredImageName};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::i18n::{Message, UiText};
use crate::images;
use crate::middleware::{RequireAdmin, push_flash, take_flash};
use crate::models::{FlashLevel, FlashMessage, NewProduct};
use crate::state::AppState;
use crate::uploads::RemovalOutcome;

use super::ProductView;

/// Admin listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/index.html")]
pub struct AdminIndexTemplate {
    pub ui: &'static UiText,
    pub username: String,
    pub flash: Vec<FlashMessage>,
    pub products: Vec<ProductView>,
}

/// Admin listing with the add form and delete links.
///
/// GET /admin
#[instrument(skip(admin, state, session))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
) -> Result<AdminIndexTemplate> {
    let flash = take_flash(&session).await?;
    let products = ProductRepository::new(state.pool())
        .list_all()
        .await?
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(AdminIndexTemplate {
        ui: state.ui(),
        username: admin.username,
        flash,
        products,
    })
}

/// The `image` part of an add-product form.
struct ImageUpload {
    filename: String,
    bytes: Bytes,
}

/// Fields of an add-product form.
#[derive(Default)]
struct AddProductForm {
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
    image: Option<ImageUpload>,
}

impl AddProductForm {
    async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let field_name = field.name().map(str::to_owned);
            match field_name.as_deref() {
                Some("name") => form.name = Some(field.text().await?),
                Some("description") => form.description = Some(field.text().await?),
                Some("price") => form.price = Some(field.text().await?),
                Some("image") => {
                    let filename = field.file_name().unwrap_or_default().to_owned();
                    let bytes = field.bytes().await?;
                    form.image = Some(ImageUpload { filename, bytes });
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value.ok_or_else(|| AppError::BadRequest(format!("missing field `{field}`")))
}

/// Create a product from the multipart form.
///
/// Text fields are stored verbatim. The image is saved under a generated
/// name and cropped before the row is inserted. A form without an image is
/// rejected with a flash message.
///
/// POST /admin/add
#[instrument(skip(admin, state, session, multipart))]
pub async fn add(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Redirect> {
    let form = AddProductForm::read(multipart).await?;
    let name = required(form.name, "name")?;
    let description = required(form.description, "description")?;
    let price = required(form.price, "price")?;

    let Some(upload) = form.image.filter(|upload| !upload.filename.is_empty()) else {
        tracing::info!("Rejected product without image");
        push_flash(
            &session,
            FlashLevel::Error,
            state.message(Message::ImageRequired),
        )
        .await?;
        return Ok(Redirect::to("/admin"));
    };

    let sanitized = SanitizedFilename::parse(&upload.filename)
        .map_err(|e| AppError::BadRequest(format!("invalid image filename: {e}")))?;
    let stored = StoredImageName::generate(&sanitized);

    let uploads = state.uploads();
    let path = uploads.save(&stored, &upload.bytes).await?;

    if let Err(e) = images::crop_to_square_blocking(path).await {
        let outcome = uploads.remove(&stored).await;
        tracing::warn!(
            error = %e,
            image = %stored,
            removal = %outcome,
            "Discarded upload that could not be processed"
        );
        return Err(e.into());
    }

    let product = ProductRepository::new(state.pool())
        .create(NewProduct {
            name,
            description,
            price: Price::from(price),
            image: stored,
        })
        .await?;

    tracing::info!(product_id = %product.id, admin = %admin.username, "Product added");
    push_flash(
        &session,
        FlashLevel::Success,
        state.message(Message::ProductAdded),
    )
    .await?;

    Ok(Redirect::to("/admin"))
}

/// Delete a product and its image file.
///
/// The row is deleted even when the file could not be removed. Deleting an
/// unknown ID is a no-op.
///
/// GET /admin/delete/{id}
#[instrument(skip(admin, state, session))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    let repo = ProductRepository::new(state.pool());

    let mut image_left_behind = false;
    if let Some(image) = repo.get_by_id(id).await?.and_then(|product| product.image) {
        image_left_behind = log_removal(&image, state.uploads().remove(&image).await);
    }

    if repo.delete(id).await? {
        tracing::info!(
            product_id = %id,
            admin = %admin.username,
            image_left_behind,
            "Product deleted"
        );
        push_flash(
            &session,
            FlashLevel::Success,
            state.message(Message::ProductDeleted),
        )
        .await?;
    } else {
        tracing::debug!(product_id = %id, "Delete of absent product ignored");
    }

    Ok(Redirect::to("/admin"))
}

/// Log a removal outcome. Returns `true` when the file may still be on disk.
fn log_removal(image: &StoredImageName, outcome: RemovalOutcome) -> bool {
    if outcome.is_failure() {
        tracing::warn!(%image, %outcome, "Could not remove product image");
    } else {
        tracing::debug!(%image, %outcome, "Product image removed");
    }
    outcome.is_failure()
}
