//! Batch image upload for a product
//!
//! Staged images are posted in one multipart request, every image under the
//! `images` key plus the owning product id as a string entry. The batch is
//! cleared only on success; on failure it is retained so the user can
//! retry.

use crate::client::{ApiClient, ApiError, FormPayload, Transport};
use crate::uploads::ImageBatch;

/// Upstream batch upload endpoint
pub const ADD_MANY_IMAGES_PATH: &str = "/productImage/add-many-images";

/// Multipart key carrying each staged image
pub const IMAGES_KEY: &str = "images";

/// Build the batch payload: every image, then the product id
#[must_use]
pub fn batch_payload(product_id: &str, batch: &ImageBatch) -> FormPayload {
    let mut payload = FormPayload::new();
    for image in batch {
        payload.file(
            IMAGES_KEY,
            image.filename.clone(),
            image.content_type.clone(),
            image.data.clone(),
        );
    }
    payload.text("productId", product_id);
    payload
}

/// Upload all staged images for `product_id`
pub async fn upload_batch<T: Transport>(
    client: &ApiClient<T>,
    product_id: &str,
    batch: &mut ImageBatch,
) -> Result<(), ApiError> {
    let payload = batch_payload(product_id, batch);
    client.post_multipart(ADD_MANY_IMAGES_PATH, payload).await?;

    tracing::info!(product_id, count = batch.len(), "product images uploaded");
    batch.clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{CredentialStore, MockTransport, PayloadPart, RawResponse, RequestBody};
    use crate::uploads::PendingImage;
    use bytes::Bytes;
    use http::StatusCode;

    fn staged_batch() -> ImageBatch {
        let mut batch = ImageBatch::new();
        batch.extend([
            PendingImage::new("a.png", "image/png", b"a".to_vec()),
            PendingImage::new("b.png", "image/png", b"b".to_vec()),
            PendingImage::new("c.png", "image/png", b"c".to_vec()),
        ]);
        batch
    }

    #[test]
    fn test_batch_payload_keys_and_order() {
        let mut batch = staged_batch();
        batch.remove(1);

        let payload = batch_payload("42", &batch);
        let files = payload.files_named(IMAGES_KEY);
        let names: Vec<&str> = files
            .iter()
            .map(|part| match part {
                PayloadPart::File { filename, .. } => filename.as_str(),
                PayloadPart::Text { .. } => unreachable!(),
            })
            .collect();

        assert_eq!(names, vec!["a.png", "c.png"]);
        assert_eq!(payload.text_value("productId"), Some("42"));
    }

    #[tokio::test]
    async fn test_upload_clears_batch_on_success() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|req| {
                let RequestBody::Multipart(payload) = &req.body else {
                    return false;
                };
                req.path == ADD_MANY_IMAGES_PATH && payload.files_named(IMAGES_KEY).len() == 3
            })
            .return_once(|_| {
                Ok(RawResponse {
                    status: StatusCode::CREATED,
                    body: Bytes::new(),
                })
            });

        let client = ApiClient::new(transport, CredentialStore::new());
        let mut batch = staged_batch();

        upload_batch(&client, "42", &mut batch).await.expect("2xx");
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_retains_batch() {
        let mut transport = MockTransport::new();
        transport.expect_execute().return_once(|_| {
            Ok(RawResponse {
                status: StatusCode::BAD_REQUEST,
                body: Bytes::from_static(br#"{"message":"product not found"}"#),
            })
        });

        let client = ApiClient::new(transport, CredentialStore::new());
        let mut batch = staged_batch();

        let err = upload_batch(&client, "42", &mut batch)
            .await
            .expect_err("400 fails");
        assert_eq!(err.notification(), "product not found");
        assert_eq!(batch.len(), 3);
    }
}
