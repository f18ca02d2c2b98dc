//! Product dashboard flows
//!
//! Fetches the category list that feeds the product form's dynamic select
//! and submits the product form upstream. Batch image upload lives in
//! [`images`].

pub mod images;

use serde::Deserialize;

use crate::account::form_payload;
use crate::client::{ApiClient, ApiError, RawResponse, Transport};
use crate::forms::registry::PRODUCT_FORM;
use crate::forms::render::{is_suppressed, DynamicOption};
use crate::forms::state::FormState;

/// Upstream category listing endpoint
pub const CATEGORIES_PATH: &str = "/productCategory/getAll";

/// Upstream product creation endpoint
pub const ADD_PRODUCT_PATH: &str = "/product/add";

/// One product category as served by the upstream API
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    /// Numeric id
    pub id: i64,
    /// Display name
    pub name: String,
}

/// Fetch categories and map them into the product form's option source
pub async fn fetch_categories<T: Transport>(
    client: &ApiClient<T>,
) -> Result<Vec<DynamicOption>, ApiError> {
    let categories: Vec<Category> = client.get_json(CATEGORIES_PATH).await?;
    Ok(categories
        .into_iter()
        .map(|c| DynamicOption::new(c.id, c.name))
        .collect())
}

/// Submit a validated product form
///
/// Fields suppressed by a dependency (the discount while `hasDiscount` is
/// not "Yes") are left out of the payload entirely.
pub async fn submit_product<T: Transport>(
    client: &ApiClient<T>,
    state: &FormState,
) -> Result<RawResponse, ApiError> {
    let visible: Vec<_> = PRODUCT_FORM
        .iter()
        .filter(|field| !is_suppressed(field, state))
        .cloned()
        .collect();
    let payload = form_payload(&visible, state);
    client.post_multipart(ADD_PRODUCT_PATH, payload).await
}
