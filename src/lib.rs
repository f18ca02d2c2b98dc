//! shopfront: server-rendered storefront admin frontend
//!
//! The interesting machinery is the declarative form subsystem: ordered
//! registries of field descriptors are rendered to interactive controls with
//! conditional visibility, dynamic option sources, and type-specific
//! validation. Everything else is glue: submissions are validated, turned
//! into multipart payloads, and forwarded to the upstream commerce API with
//! the stored bearer token attached.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use shopfront::config::ShopfrontConfig;
//! use shopfront::handlers;
//! use shopfront::state::AppState;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     shopfront::observability::init()?;
//!
//!     let config = ShopfrontConfig::load()?;
//!     let bind = config.service.bind.clone();
//!     let app = handlers::router(AppState::new(config));
//!
//!     let listener = tokio::net::TcpListener::bind(&bind).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod observability;
pub mod products;
pub mod state;
pub mod uploads;

pub mod prelude {
    //! Convenience re-exports for common types

    pub use crate::client::{ApiClient, ApiError, CredentialStore, FormPayload, Transport};
    pub use crate::config::ShopfrontConfig;
    pub use crate::error::ShopfrontError;
    pub use crate::forms::{
        render_field, render_form, validate_form, DynamicOption, EditorHandle, FieldDescriptor,
        FieldType, FormState, RenderContext, RenderedControl, ValidationRules,
    };
    pub use crate::state::AppState;
    pub use crate::uploads::{ImageBatch, PendingImage};
}
