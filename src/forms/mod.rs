//! Declarative form subsystem
//!
//! Forms are described by ordered registries of [`field::FieldDescriptor`]s.
//! A page builds a [`state::FormState`] from a registry, renders each
//! descriptor through [`render::render_field`] (which resolves dynamic
//! option lists and conditional suppression), and validates submissions with
//! [`validate::validate_form`].

pub mod editor;
pub mod field;
pub mod registry;
pub mod render;
pub mod state;
pub mod validate;

pub use editor::EditorHandle;
pub use field::{
    FieldDependency, FieldDescriptor, FieldType, OptionSource, PatternRule, ValidationRules,
};
pub use registry::{
    FormRegistry, CONTACT_FORM, PRODUCT_FORM, PROFILE_FORM, REGISTER_FORM, RESET_FORM,
};
pub use render::{
    escape, render_field, render_form, DynamicOption, RenderContext, RenderedControl,
    RenderedOption,
};
pub use state::{FieldValue, FormState};
pub use validate::validate_form;
