//! Field renderer
//!
//! Maps one [`FieldDescriptor`] plus live form state to a renderable
//! control, resolving dynamic option lists and conditional suppression.
//! Each descriptor is evaluated independently, in registry order.

use super::editor::EditorHandle;
use super::field::{FieldDescriptor, FieldType, OptionSource};
use super::registry::FormRegistry;
use super::state::FormState;

/// Placeholder entry shown when a select has no default value
pub const SELECT_PLACEHOLDER: &str = "Select an option";

/// The form key the rich-text editor binds to
pub const EDITOR_FIELD: &str = "description";

/// One externally supplied select option (id + display name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicOption {
    /// Stringified id, used as the option value
    pub id: String,
    /// Display name
    pub name: String,
}

impl DynamicOption {
    /// Create an option; numeric ids are stringified here
    #[must_use]
    pub fn new(id: impl ToString, name: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.into(),
        }
    }
}

/// Per-render inputs that are not part of the descriptor
///
/// A select marked dynamic renders an empty option list when no source is
/// supplied; that is a caller bug, not a runtime error.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext<'a> {
    /// Option source for dynamic selects
    pub dynamic_options: &'a [DynamicOption],
    /// Side channel to the rich-text widget, if the page mounts one
    pub editor: Option<&'a EditorHandle>,
}

impl<'a> RenderContext<'a> {
    /// Context with no dynamic options and no editor
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Context carrying a dynamic option source
    #[must_use]
    pub fn with_options(options: &'a [DynamicOption]) -> Self {
        Self {
            dynamic_options: options,
            editor: None,
        }
    }

    /// Attach an editor handle
    #[must_use]
    pub fn editor(mut self, handle: &'a EditorHandle) -> Self {
        self.editor = Some(handle);
        self
    }
}

/// Validation attributes carried onto the rendered control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlRules {
    /// Whether the control carries `required`
    pub required: bool,
    /// `minlength` attribute
    pub min_length: Option<usize>,
    /// `maxlength` attribute
    pub max_length: Option<usize>,
    /// `pattern` attribute source
    pub pattern: Option<String>,
}

impl ControlRules {
    fn from_field(field: &FieldDescriptor) -> Self {
        Self {
            required: field.validation.required.is_some(),
            min_length: field.validation.min_length,
            max_length: field.validation.max_length,
            pattern: field
                .validation
                .pattern
                .as_ref()
                .map(|p| p.regex.as_str().to_string()),
        }
    }
}

/// One option of a rendered select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOption {
    /// Option value attribute
    pub value: String,
    /// Display text
    pub label: String,
    /// Whether this option is currently selected
    pub selected: bool,
    /// Disabled placeholder entry
    pub disabled: bool,
}

/// A renderable form control produced for one descriptor
#[derive(Debug, Clone)]
pub enum RenderedControl {
    /// Plain bound input (text/email/tel/number/password)
    Input {
        /// Field name
        name: String,
        /// HTML type attribute
        input_type: &'static str,
        /// Label text
        label: String,
        /// Placeholder text
        placeholder: String,
        /// Current bound value
        value: String,
        /// Validation attributes
        rules: ControlRules,
        /// Current validation error, if any
        error: Option<String>,
    },
    /// Multi-line text area
    Textarea {
        /// Field name
        name: String,
        /// Label text
        label: String,
        /// Placeholder text
        placeholder: String,
        /// Current bound value
        value: String,
        /// Validation attributes
        rules: ControlRules,
        /// Current validation error, if any
        error: Option<String>,
    },
    /// Select dropdown with resolved options
    Select {
        /// Field name
        name: String,
        /// Label text
        label: String,
        /// Resolved options in source order (placeholder first when present)
        options: Vec<RenderedOption>,
        /// Validation attributes
        rules: ControlRules,
        /// Current validation error, if any
        error: Option<String>,
    },
    /// Rich-text editor mount point
    Editor {
        /// Bound form key (always the description field)
        name: String,
        /// Label text
        label: String,
        /// Current content passed through to the widget
        content: String,
        /// Side channel for host-page access to the widget
        handle: EditorHandle,
        /// Current validation error, if any
        error: Option<String>,
    },
    /// File input with preview data
    File {
        /// Field name
        name: String,
        /// Label text
        label: String,
        /// First previously chosen file, for preview
        selected_filename: Option<String>,
        /// Existing remote image URL, for preview when editing
        preview_url: Option<String>,
        /// Validation attributes
        rules: ControlRules,
        /// Current validation error, if any
        error: Option<String>,
    },
}

/// Whether a descriptor is suppressed by its dependency under `state`
#[must_use]
pub fn is_suppressed(field: &FieldDescriptor, state: &FormState) -> bool {
    field
        .dependency
        .as_ref()
        .is_some_and(|dep| state.text_of(&dep.controlling_field) != dep.required_value)
}

/// Render one descriptor against the current form state
///
/// Returns `None` when the descriptor is suppressed by its dependency.
#[must_use]
pub fn render_field(
    field: &FieldDescriptor,
    state: &FormState,
    ctx: &RenderContext<'_>,
) -> Option<RenderedControl> {
    if is_suppressed(field, state) {
        return None;
    }

    let control = match field.field_type {
        FieldType::Select => render_select(field, state, ctx),
        FieldType::Editor => render_editor(field, state, ctx),
        FieldType::File => render_file(field, state),
        FieldType::Textarea => render_textarea(field, state),
        FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::Number
        | FieldType::Password => render_input(field, state),
    };
    Some(control)
}

/// Render a whole registry in order, skipping suppressed fields
#[must_use]
pub fn render_form(
    registry: &FormRegistry,
    state: &FormState,
    ctx: &RenderContext<'_>,
) -> Vec<RenderedControl> {
    registry
        .iter()
        .filter_map(|field| render_field(field, state, ctx))
        .collect()
}

fn render_select(
    field: &FieldDescriptor,
    state: &FormState,
    ctx: &RenderContext<'_>,
) -> RenderedControl {
    let current = state.text_of(field.name);
    let mut options = Vec::new();

    if field.default_value.is_none() {
        options.push(RenderedOption {
            value: String::new(),
            label: SELECT_PLACEHOLDER.to_string(),
            selected: current.is_empty(),
            disabled: true,
        });
    }

    match field.options.as_ref() {
        Some(OptionSource::Dynamic) | None => {
            // Missing source with a dynamic select yields an empty list
            options.extend(ctx.dynamic_options.iter().map(|opt| RenderedOption {
                value: opt.id.clone(),
                label: opt.name.clone(),
                selected: opt.id == current,
                disabled: false,
            }));
        }
        Some(OptionSource::Static(declared)) => {
            options.extend(declared.iter().map(|opt| RenderedOption {
                value: (*opt).to_string(),
                label: (*opt).to_string(),
                selected: *opt == current,
                disabled: false,
            }));
        }
    }

    RenderedControl::Select {
        name: field.name.to_string(),
        label: field.display_label().to_string(),
        options,
        rules: ControlRules::from_field(field),
        error: state.error_of(field.name).map(ToString::to_string),
    }
}

fn render_editor(
    field: &FieldDescriptor,
    state: &FormState,
    ctx: &RenderContext<'_>,
) -> RenderedControl {
    // The editor always binds the description key, regardless of name
    let content = state.text_of(EDITOR_FIELD).to_string();
    let handle = ctx.editor.cloned().unwrap_or_default();
    handle.set_content(content.clone());

    RenderedControl::Editor {
        name: EDITOR_FIELD.to_string(),
        label: field.display_label().to_string(),
        content,
        handle,
        error: state.error_of(EDITOR_FIELD).map(ToString::to_string),
    }
}

fn render_file(field: &FieldDescriptor, state: &FormState) -> RenderedControl {
    RenderedControl::File {
        name: field.name.to_string(),
        label: field.display_label().to_string(),
        selected_filename: state.first_file(field.name).map(|f| f.filename.clone()),
        preview_url: state.image_url().map(ToString::to_string),
        rules: ControlRules::from_field(field),
        error: state.error_of(field.name).map(ToString::to_string),
    }
}

fn render_textarea(field: &FieldDescriptor, state: &FormState) -> RenderedControl {
    RenderedControl::Textarea {
        name: field.name.to_string(),
        label: field.display_label().to_string(),
        placeholder: field.placeholder.to_string(),
        value: state.text_of(field.name).to_string(),
        rules: ControlRules::from_field(field),
        error: state.error_of(field.name).map(ToString::to_string),
    }
}

fn render_input(field: &FieldDescriptor, state: &FormState) -> RenderedControl {
    RenderedControl::Input {
        name: field.name.to_string(),
        input_type: field.field_type.as_str(),
        label: field.display_label().to_string(),
        placeholder: field.placeholder.to_string(),
        value: state.text_of(field.name).to_string(),
        rules: ControlRules::from_field(field),
        error: state.error_of(field.name).map(ToString::to_string),
    }
}

// =============================================================================
// HTML emission
// =============================================================================

impl RenderedControl {
    /// Emit the HTML fragment for this control
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Input {
                name,
                input_type,
                label,
                placeholder,
                value,
                rules,
                error,
            } => {
                let mut html = open_group(name, label);
                html.push_str(&format!(
                    r#"<input type="{input_type}" id="{id}" name="{id}" placeholder="{ph}" value="{val}"{attrs}>"#,
                    id = escape(name),
                    ph = escape(placeholder),
                    val = escape(value),
                    attrs = rules_attrs(rules),
                ));
                close_group(html, error)
            }
            Self::Textarea {
                name,
                label,
                placeholder,
                value,
                rules,
                error,
            } => {
                let mut html = open_group(name, label);
                html.push_str(&format!(
                    r#"<textarea id="{id}" name="{id}" placeholder="{ph}"{attrs}>{val}</textarea>"#,
                    id = escape(name),
                    ph = escape(placeholder),
                    val = escape(value),
                    attrs = rules_attrs(rules),
                ));
                close_group(html, error)
            }
            Self::Select {
                name,
                label,
                options,
                rules,
                error,
            } => {
                let mut html = open_group(name, label);
                html.push_str(&format!(
                    r#"<select id="{id}" name="{id}"{attrs}>"#,
                    id = escape(name),
                    attrs = rules_attrs(rules),
                ));
                for opt in options {
                    html.push_str(&format!(
                        r#"<option value="{val}"{sel}{dis}>{lbl}</option>"#,
                        val = escape(&opt.value),
                        sel = if opt.selected { " selected" } else { "" },
                        dis = if opt.disabled { " disabled" } else { "" },
                        lbl = escape(&opt.label),
                    ));
                }
                html.push_str("</select>");
                close_group(html, error)
            }
            Self::Editor {
                name,
                label,
                content,
                error,
                handle: _,
            } => {
                let mut html = open_group(name, label);
                html.push_str(&format!(
                    r#"<div class="rich-text" id="{id}-editor"><textarea id="{id}" name="{id}">{val}</textarea></div>"#,
                    id = escape(name),
                    val = escape(content),
                ));
                close_group(html, error)
            }
            Self::File {
                name,
                label,
                selected_filename,
                preview_url,
                rules,
                error,
            } => {
                let mut html = open_group(name, label);
                if let Some(url) = preview_url {
                    html.push_str(&format!(
                        r#"<img class="preview" src="{}" alt="current image">"#,
                        escape(url)
                    ));
                }
                if let Some(filename) = selected_filename {
                    html.push_str(&format!(
                        r#"<span class="selected-file">{}</span>"#,
                        escape(filename)
                    ));
                }
                html.push_str(&format!(
                    r#"<input type="file" id="{id}" name="{id}" accept="image/*"{attrs}>"#,
                    id = escape(name),
                    attrs = rules_attrs(rules),
                ));
                close_group(html, error)
            }
        }
    }
}

fn open_group(name: &str, label: &str) -> String {
    format!(
        r#"<div class="input-group"><label for="{id}">{lbl}</label>"#,
        id = escape(name),
        lbl = escape(label),
    )
}

fn close_group(mut html: String, error: &Option<String>) -> String {
    if let Some(message) = error {
        html.push_str(&format!(
            r#"<p class="field-error">{}</p>"#,
            escape(message)
        ));
    }
    html.push_str("</div>");
    html
}

fn rules_attrs(rules: &ControlRules) -> String {
    let mut attrs = String::new();
    if rules.required {
        attrs.push_str(" required");
    }
    if let Some(min) = rules.min_length {
        attrs.push_str(&format!(r#" minlength="{min}""#));
    }
    if let Some(max) = rules.max_length {
        attrs.push_str(&format!(r#" maxlength="{max}""#));
    }
    if let Some(pattern) = &rules.pattern {
        attrs.push_str(&format!(r#" pattern="{}""#, escape(pattern)));
    }
    attrs
}

/// Escape a string for interpolation into HTML text or attribute values
#[must_use]
pub fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
