//! Account flows
//!
//! Registration posts the signup form as multipart data to the upstream
//! account endpoint and, on success, hands the caller an OTP-verification
//! transition carrying the submitted email.

use std::time::Duration;

use crate::client::{ApiClient, ApiError, FormPayload, Transport};
use crate::forms::registry::FormRegistry;
use crate::forms::state::{FieldValue, FormState};

/// Upstream registration endpoint
pub const REGISTER_PATH: &str = "/account/register";

/// How long the verification view allows before offering an OTP resend
pub const OTP_RESEND_WINDOW: Duration = Duration::from_secs(3 * 60);

/// Successful registration: transition to OTP verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpVerification {
    /// Email the code was sent to, echoed from the submitted form
    pub email: String,
    /// Resend window for the verification view
    pub resend_window: Duration,
}

/// Build the multipart payload for a registry-backed form
///
/// Every non-file field becomes a string entry under its field name; a file
/// field contributes its first chosen file as a binary entry. Fields are
/// emitted in registry order.
#[must_use]
pub fn form_payload(registry: &FormRegistry, state: &FormState) -> FormPayload {
    let mut payload = FormPayload::new();
    for field in registry {
        match state.value_of(field.name) {
            FieldValue::Files(files) => {
                if let Some(file) = files.first() {
                    payload.file(
                        field.name,
                        file.filename.clone(),
                        file.content_type.clone(),
                        file.data.clone(),
                    );
                }
            }
            FieldValue::Text(value) => payload.text(field.name, value.clone()),
            FieldValue::Empty => payload.text(field.name, ""),
        }
    }
    payload
}

/// Submit a validated registration form
///
/// The caller is responsible for running validation first; this function
/// only assembles and posts the payload. Errors are terminal for the
/// attempt: the caller surfaces one notification and the user re-submits.
pub async fn register<T: Transport>(
    client: &ApiClient<T>,
    registry: &FormRegistry,
    state: &FormState,
) -> Result<OtpVerification, ApiError> {
    let email = state.text_of("email").to_string();
    let payload = form_payload(registry, state);

    let response = client.post_multipart(REGISTER_PATH, payload).await?;
    tracing::info!(status = %response.status, %email, "registration accepted");

    Ok(OtpVerification {
        email,
        resend_window: OTP_RESEND_WINDOW,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{
        CredentialStore, MockTransport, PayloadPart, RawResponse, RequestBody,
    };
    use crate::forms::registry::REGISTER_FORM;
    use crate::forms::validate_form;
    use crate::uploads::PendingImage;
    use bytes::Bytes;
    use http::StatusCode;

    fn filled_state() -> FormState {
        let mut state = FormState::new();
        state.set_text("firstName", "Omar");
        state.set_text("secondName", "Samir");
        state.set_text("email", "omar@example.com");
        state.set_text("phone", "01012345678");
        state.set_text("password", "secret-pass");
        state.set_text("confirmedPassword", "secret-pass");
        state.set_text("address", "12 Main Street, Cairo");
        state.set_files(
            "image",
            vec![PendingImage::new("me.png", "image/png", b"png-bytes".to_vec())],
        );
        state
    }

    #[test]
    fn test_payload_shape() {
        let mut state = filled_state();
        assert!(validate_form(&REGISTER_FORM, &mut state));

        let payload = form_payload(&REGISTER_FORM, &state);

        // Every non-file field is a string entry
        assert_eq!(payload.text_value("firstName"), Some("Omar"));
        assert_eq!(payload.text_value("email"), Some("omar@example.com"));
        assert_eq!(payload.text_value("address"), Some("12 Main Street, Cairo"));

        // The image is a binary entry keyed "image"
        let files = payload.files_named("image");
        assert_eq!(files.len(), 1);
        let PayloadPart::File {
            filename,
            content_type,
            data,
            ..
        } = files[0]
        else {
            panic!("image part is a file");
        };
        assert_eq!(filename, "me.png");
        assert_eq!(content_type, "image/png");
        assert_eq!(data.as_ref(), b"png-bytes");
    }

    #[tokio::test]
    async fn test_register_created_transitions_to_otp_view() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|req| {
                if req.path != REGISTER_PATH {
                    return false;
                }
                let RequestBody::Multipart(payload) = &req.body else {
                    return false;
                };
                payload.text_value("email") == Some("omar@example.com")
                    && payload.files_named("image").len() == 1
            })
            .return_once(|_| {
                Ok(RawResponse {
                    status: StatusCode::CREATED,
                    body: Bytes::new(),
                })
            });

        let client = ApiClient::new(transport, CredentialStore::new());
        let outcome = register(&client, &REGISTER_FORM, &filled_state())
            .await
            .expect("201 succeeds");

        assert_eq!(outcome.email, "omar@example.com");
        assert_eq!(outcome.resend_window, OTP_RESEND_WINDOW);
    }

    #[tokio::test]
    async fn test_register_failure_carries_server_message() {
        let mut transport = MockTransport::new();
        transport.expect_execute().return_once(|_| {
            Ok(RawResponse {
                status: StatusCode::BAD_REQUEST,
                body: Bytes::from_static(br#"{"message":"phone already used"}"#),
            })
        });

        let client = ApiClient::new(transport, CredentialStore::new());
        let err = register(&client, &REGISTER_FORM, &filled_state())
            .await
            .expect_err("400 fails");
        assert_eq!(err.notification(), "phone already used");
    }
}
