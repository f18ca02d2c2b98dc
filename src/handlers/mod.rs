//! HTTP handlers
//!
//! Thin glue between the form subsystem and the upstream client: GET pages
//! render a registry through the field renderer, POST handlers parse the
//! multipart submission back into form state, validate, and forward
//! upstream. Successful submissions answer with an `HX-Redirect` to the
//! follow-up view.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use axum_htmx::HxRedirect;
use serde::Deserialize;

use crate::account;
use crate::client::ApiError;
use crate::error::ShopfrontError;
use crate::forms::registry::FormRegistry;
use crate::forms::render::{escape, render_form, RenderContext, RenderedControl};
use crate::forms::state::FormState;
use crate::forms::validate_form;
use crate::forms::EditorHandle;
use crate::forms::{PRODUCT_FORM, REGISTER_FORM};
use crate::products;
use crate::state::AppState;
use crate::uploads::PendingImage;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/signup", get(signup_page).post(signup_submit))
        .route("/verify-otp", get(verify_otp_page))
        .route("/signin", get(signin_page))
        .route(
            "/dashboard/products/new",
            get(product_form_page).post(product_submit),
        )
        .route(
            "/dashboard/products/{product_id}/images",
            get(images_page).post(stage_images),
        )
        .route(
            "/dashboard/products/{product_id}/images/{index}",
            axum::routing::delete(remove_image),
        )
        .route(
            "/dashboard/products/{product_id}/images/upload",
            post(upload_images),
        )
        .with_state(state)
}

// =============================================================================
// Multipart parsing
// =============================================================================

/// Parse a multipart submission into form state for `registry`
///
/// Parts carrying a filename become file values (empty selections are
/// ignored); everything else is stored as text. Unknown part names are kept
/// so generic fields like `imageUrl` survive round trips.
pub async fn parse_multipart(
    registry: &FormRegistry,
    mut multipart: Multipart,
) -> Result<FormState, ShopfrontError> {
    let mut state = FormState::from_registry(registry);
    let mut files: Vec<(String, PendingImage)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ShopfrontError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        if let Some(filename) = field.file_name().map(ToString::to_string) {
            let content_type = field
                .content_type()
                .unwrap_or(mime::APPLICATION_OCTET_STREAM.as_ref())
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ShopfrontError::BadRequest(e.to_string()))?;
            if !data.is_empty() {
                files.push((name, PendingImage::new(filename, content_type, data)));
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ShopfrontError::BadRequest(e.to_string()))?;
            state.set_text(name, value);
        }
    }

    let mut grouped: Vec<(String, Vec<PendingImage>)> = Vec::new();
    for (name, image) in files {
        match grouped.iter_mut().find(|(n, _)| *n == name) {
            Some((_, list)) => list.push(image),
            None => grouped.push((name, vec![image])),
        }
    }
    for (name, list) in grouped {
        state.set_files(name, list);
    }

    Ok(state)
}

// =============================================================================
// Page shells
// =============================================================================

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{title}</title><script src=\"/assets/htmx.min.js\"></script></head>\
         <body>{body}</body></html>"
    ))
}

fn form_html(
    action: &str,
    submit_label: &str,
    controls: &[RenderedControl],
    notification: Option<&str>,
) -> String {
    let mut html = String::new();
    if let Some(message) = notification {
        html.push_str(&format!(
            r#"<div class="toast toast-error">{}</div>"#,
            escape(message)
        ));
    }
    html.push_str(&format!(
        r#"<form hx-post="{action}" hx-encoding="multipart/form-data" hx-disabled-elt="find button">"#
    ));
    for control in controls {
        html.push_str(&control.to_html());
    }
    html.push_str(&format!(
        r#"<button type="submit">{submit_label}</button></form>"#
    ));
    html
}

fn redirect(status: StatusCode, target: &str) -> Response {
    // HxRedirect is response parts only; the unit body completes the tuple
    (status, HxRedirect::from(target), ()).into_response()
}

// =============================================================================
// Registration
// =============================================================================

async fn signup_page() -> Html<String> {
    let state = FormState::from_registry(&REGISTER_FORM);
    let controls = render_form(&REGISTER_FORM, &state, &RenderContext::empty());
    page("Sign up", &form_html("/signup", "Sign up", &controls, None))
}

async fn signup_submit(
    State(app): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ShopfrontError> {
    let mut form = parse_multipart(&REGISTER_FORM, multipart).await?;

    if !validate_form(&REGISTER_FORM, &mut form) {
        let controls = render_form(&REGISTER_FORM, &form, &RenderContext::empty());
        let body = form_html("/signup", "Sign up", &controls, None);
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page("Sign up", &body)).into_response());
    }

    match account::register(app.api(), &REGISTER_FORM, &form).await {
        Ok(otp) => Ok(redirect(
            StatusCode::CREATED,
            &format!("/verify-otp?email={}", otp.email),
        )),
        Err(ApiError::Unauthorized) => Ok(redirect(StatusCode::UNAUTHORIZED, "/signin")),
        Err(err) => {
            let controls = render_form(&REGISTER_FORM, &form, &RenderContext::empty());
            let body = form_html("/signup", "Sign up", &controls, Some(&err.notification()));
            Ok(page("Sign up", &body).into_response())
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerifyQuery {
    email: String,
}

async fn verify_otp_page(Query(query): Query<VerifyQuery>) -> Html<String> {
    let minutes = account::OTP_RESEND_WINDOW.as_secs() / 60;
    page(
        "Verify your email",
        &format!(
            r#"<p>We have sent an otp code to <strong>{email}</strong>.</p>
               <p>You can request a new code in {minutes} minutes.</p>"#,
            email = escape(&query.email),
        ),
    )
}

async fn signin_page() -> Html<String> {
    page("Sign in", "<p>Your session has expired. Please sign in again.</p>")
}

// =============================================================================
// Product form
// =============================================================================

async fn product_form_page(State(app): State<AppState>) -> Result<Html<String>, ShopfrontError> {
    let categories = products::fetch_categories(app.api()).await?;
    let editor = EditorHandle::new();
    let ctx = RenderContext::with_options(&categories).editor(&editor);

    let state = FormState::from_registry(&PRODUCT_FORM);
    let controls = render_form(&PRODUCT_FORM, &state, &ctx);

    let mut body = form_html("/dashboard/products/new", "Add Product", &controls, None);
    body.push_str(&format!(
        r#"<script src="/assets/editor.js" data-editor-key="{}"></script>"#,
        app.config().editor.api_key
    ));
    Ok(page("Add Product", &body))
}

async fn product_submit(
    State(app): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ShopfrontError> {
    let mut form = parse_multipart(&PRODUCT_FORM, multipart).await?;

    if !validate_form(&PRODUCT_FORM, &mut form) {
        let categories = products::fetch_categories(app.api()).await.unwrap_or_default();
        let ctx = RenderContext::with_options(&categories);
        let controls = render_form(&PRODUCT_FORM, &form, &ctx);
        let body = form_html("/dashboard/products/new", "Add Product", &controls, None);
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page("Add Product", &body)).into_response());
    }

    match products::submit_product(app.api(), &form).await {
        Ok(_) => Ok(redirect(StatusCode::CREATED, "/admin/products")),
        Err(ApiError::Unauthorized) => Ok(redirect(StatusCode::UNAUTHORIZED, "/signin")),
        Err(err) => {
            let categories = products::fetch_categories(app.api()).await.unwrap_or_default();
            let ctx = RenderContext::with_options(&categories);
            let controls = render_form(&PRODUCT_FORM, &form, &ctx);
            let body = form_html(
                "/dashboard/products/new",
                "Add Product",
                &controls,
                Some(&err.notification()),
            );
            Ok(page("Add Product", &body).into_response())
        }
    }
}

// =============================================================================
// Product images
// =============================================================================

fn staged_list_html(product_id: &str, batch: &crate::uploads::ImageBatch) -> String {
    let mut html = format!(r#"<div id="staged-images" data-count="{}">"#, batch.len());
    for (index, image) in batch.iter().enumerate() {
        html.push_str(&format!(
            r##"<figure><figcaption>{name}</figcaption>
               <button hx-delete="/dashboard/products/{product_id}/images/{index}"
                       hx-target="#staged-images" hx-swap="outerHTML">x</button></figure>"##,
            name = escape(&image.filename),
            product_id = escape(product_id),
        ));
    }
    html.push_str("</div>");
    html
}

async fn images_page(
    State(app): State<AppState>,
    Path(product_id): Path<String>,
) -> Html<String> {
    let batch = app.batch_snapshot(&product_id);
    let body = format!(
        r##"<h2>Add Product Images</h2>
           <form hx-post="/dashboard/products/{product_id}/images"
                 hx-encoding="multipart/form-data" hx-target="#staged-images" hx-swap="outerHTML">
           <input type="file" name="images" accept="{accept}" multiple>
           <button type="submit">+</button></form>
           {staged}
           <button hx-post="/dashboard/products/{product_id}/images/upload"
                   hx-disabled-elt="this">Add Images</button>"##,
        product_id = escape(&product_id),
        accept = escape(&app.config().uploads.accept),
        staged = staged_list_html(&product_id, &batch),
    );
    page("Add Product Images", &body)
}

async fn stage_images(
    State(app): State<AppState>,
    Path(product_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Html<String>, ShopfrontError> {
    let mut selected = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ShopfrontError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("images") {
            continue;
        }
        let Some(filename) = field.file_name().map(ToString::to_string) else {
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM.as_ref())
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ShopfrontError::BadRequest(e.to_string()))?;
        if !data.is_empty() {
            selected.push(PendingImage::new(filename, content_type, data));
        }
    }

    app.stage_images(&product_id, selected);
    Ok(Html(staged_list_html(&product_id, &app.batch_snapshot(&product_id))))
}

async fn remove_image(
    State(app): State<AppState>,
    Path((product_id, index)): Path<(String, usize)>,
) -> Result<Html<String>, ShopfrontError> {
    if !app.remove_staged_image(&product_id, index) {
        return Err(ShopfrontError::NotFound(format!(
            "no staged image at index {index}"
        )));
    }
    Ok(Html(staged_list_html(&product_id, &app.batch_snapshot(&product_id))))
}

async fn upload_images(
    State(app): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Response, ShopfrontError> {
    let mut batch = app.batch_snapshot(&product_id);
    let uploaded = batch.len();

    match products::images::upload_batch(app.api(), &product_id, &mut batch).await {
        Ok(()) => {
            app.discard_uploaded(&product_id, uploaded);
            let mut html = r#"<div class="toast toast-success">Product Images Added Successfully</div>"#.to_string();
            html.push_str(&staged_list_html(&product_id, &app.batch_snapshot(&product_id)));
            Ok(Html(html).into_response())
        }
        Err(ApiError::Unauthorized) => Ok(redirect(StatusCode::UNAUTHORIZED, "/signin")),
        // Failed batches are retained; the dashboard is the fallback view
        Err(err) => {
            tracing::warn!(product_id, error = %err, "batch upload failed");
            Ok(redirect(StatusCode::OK, "/admin/products"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staged_list_html_indexes_in_order() {
        let mut batch = crate::uploads::ImageBatch::new();
        batch.extend([
            PendingImage::new("a.png", "image/png", b"a".to_vec()),
            PendingImage::new("b.png", "image/png", b"b".to_vec()),
        ]);

        let html = staged_list_html("42", &batch);
        assert!(html.contains(r#"data-count="2""#));
        assert!(html.contains("/dashboard/products/42/images/0"));
        assert!(html.contains("/dashboard/products/42/images/1"));
        assert!(html.contains(r##"hx-target="#staged-images""##));
        assert!(html.contains("a.png"));
    }

    #[test]
    fn test_staged_list_html_escapes_filenames() {
        let mut batch = crate::uploads::ImageBatch::new();
        batch.push(PendingImage::new(
            "<script>alert(1)</script>.png",
            "image/png",
            b"x".to_vec(),
        ));

        let html = staged_list_html("42", &batch);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;.png"));
    }

    #[test]
    fn test_form_html_carries_notification() {
        let html = form_html("/signup", "Sign up", &[], Some("Something went wrong"));
        assert!(html.contains("toast-error"));
        assert!(html.contains("Something went wrong"));
        assert!(html.contains(r#"hx-encoding="multipart/form-data""#));
    }

    #[test]
    fn test_form_html_escapes_notification_markup() {
        let html = form_html("/signup", "Sign up", &[], Some("<b>server says</b>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;server says&lt;/b&gt;"));
    }

    #[test]
    fn test_redirect_sets_hx_header_and_status() {
        let response = redirect(StatusCode::CREATED, "/verify-otp?email=omar@example.com");
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response
                .headers()
                .get("HX-Redirect")
                .and_then(|v| v.to_str().ok()),
            Some("/verify-otp?email=omar@example.com")
        );
    }
}
