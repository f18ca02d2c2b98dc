//! Field descriptor types
//!
//! Defines the declarative configuration for a single form field: its
//! control type, validation rules, option source, and optional visibility
//! dependency on another field.

use regex::Regex;

/// Control type for a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    /// Text input (default)
    #[default]
    Text,
    /// Email input
    Email,
    /// Telephone input
    Phone,
    /// Number input
    Number,
    /// Password input (masked)
    Password,
    /// File upload
    File,
    /// Multi-line text area
    Textarea,
    /// Select dropdown
    Select,
    /// Rich-text editor
    Editor,
}

impl FieldType {
    /// Get the HTML type attribute value for input-flavored fields
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Phone => "tel",
            Self::Number => "number",
            Self::Password => "password",
            Self::File => "file",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Editor => "editor",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Regex rule with its configured failure message
///
/// The message is surfaced verbatim on mismatch; there is no fallback
/// message construction.
#[derive(Debug, Clone)]
pub struct PatternRule {
    /// Compiled pattern
    pub regex: Regex,
    /// Message shown when the value does not match
    pub message: String,
}

impl PatternRule {
    /// Create a pattern rule from a regex literal
    ///
    /// # Panics
    ///
    /// Panics if the pattern does not compile. Rules are declared in static
    /// registry tables, so this fires at first registry access.
    #[must_use]
    pub fn new(pattern: &str, message: impl Into<String>) -> Self {
        Self {
            regex: Regex::new(pattern).expect("registry pattern compiles"),
            message: message.into(),
        }
    }
}

/// Validation rule set for one field
#[derive(Debug, Clone, Default)]
pub struct ValidationRules {
    /// Required message; `None` means the field is optional
    pub required: Option<String>,
    /// Minimum length of the textual value
    pub min_length: Option<usize>,
    /// Maximum length of the textual value
    pub max_length: Option<usize>,
    /// Pattern rule applied to the textual value
    pub pattern: Option<PatternRule>,
}

impl ValidationRules {
    /// Rules with only a required message
    #[must_use]
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            required: Some(message.into()),
            ..Self::default()
        }
    }

    /// Set length bounds
    #[must_use]
    pub const fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Set the pattern rule
    #[must_use]
    pub fn pattern(mut self, pattern: &str, message: impl Into<String>) -> Self {
        self.pattern = Some(PatternRule::new(pattern, message));
        self
    }
}

/// Visibility dependency on another field
///
/// A descriptor with a dependency is rendered only while the controlling
/// field's current value equals `required_value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDependency {
    /// Name of the controlling field
    pub controlling_field: String,
    /// Value the controlling field must hold for this field to render
    pub required_value: String,
}

impl FieldDependency {
    /// Create a dependency on `controlling_field == required_value`
    #[must_use]
    pub fn new(controlling_field: impl Into<String>, required_value: impl Into<String>) -> Self {
        Self {
            controlling_field: controlling_field.into(),
            required_value: required_value.into(),
        }
    }
}

/// Where a select field's options come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSource {
    /// Ordered static option list; the option value is the literal string
    Static(Vec<&'static str>),
    /// Options supplied at render time from an external data source
    Dynamic,
}

/// Declarative configuration for one form field
///
/// Descriptors are immutable once defined; registries hold them in ordered
/// static tables. `name` must be unique within a registry.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Unique key identifying the bound form value
    pub name: &'static str,
    /// Label text
    pub label: Option<&'static str>,
    /// Placeholder text
    pub placeholder: &'static str,
    /// Control type
    pub field_type: FieldType,
    /// Validation rule set
    pub validation: ValidationRules,
    /// Option source (selects only)
    pub options: Option<OptionSource>,
    /// Initial value; also controls the select placeholder entry
    pub default_value: Option<&'static str>,
    /// Optional visibility dependency
    pub dependency: Option<FieldDependency>,
}

impl FieldDescriptor {
    /// Create a descriptor with the given name and type
    #[must_use]
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            label: None,
            placeholder: "",
            field_type,
            validation: ValidationRules::default(),
            options: None,
            default_value: None,
            dependency: None,
        }
    }

    /// Set the label
    #[must_use]
    pub const fn label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Set the placeholder
    #[must_use]
    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Set the validation rules
    #[must_use]
    pub fn validation(mut self, rules: ValidationRules) -> Self {
        self.validation = rules;
        self
    }

    /// Use a static option list
    #[must_use]
    pub fn static_options(mut self, options: Vec<&'static str>) -> Self {
        debug_assert!(
            !options.is_empty(),
            "static select must declare at least one option"
        );
        self.options = Some(OptionSource::Static(options));
        self
    }

    /// Mark the option list as supplied at render time
    #[must_use]
    pub fn dynamic_options(mut self) -> Self {
        self.options = Some(OptionSource::Dynamic);
        self
    }

    /// Set the default value
    #[must_use]
    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Render this field only while another field holds a specific value
    #[must_use]
    pub fn depends_on(mut self, field: &'static str, value: &'static str) -> Self {
        self.dependency = Some(FieldDependency::new(field, value));
        self
    }

    /// Whether this select resolves its options at render time
    #[must_use]
    pub fn has_dynamic_options(&self) -> bool {
        matches!(self.options, Some(OptionSource::Dynamic))
    }

    /// Label if set, placeholder otherwise
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.unwrap_or(self.placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_as_str() {
        assert_eq!(FieldType::Email.as_str(), "email");
        assert_eq!(FieldType::Phone.as_str(), "tel");
        assert_eq!(FieldType::Password.as_str(), "password");
    }

    #[test]
    fn test_pattern_rule_matches() {
        let rule = PatternRule::new(r"^[0-9]{6}$", "invalid otp code");
        assert!(rule.regex.is_match("123456"));
        assert!(!rule.regex.is_match("12a456"));
        assert_eq!(rule.message, "invalid otp code");
    }

    #[test]
    fn test_descriptor_builder() {
        let field = FieldDescriptor::new("email", FieldType::Email)
            .placeholder("Email")
            .validation(ValidationRules::required("email is required"));

        assert_eq!(field.name, "email");
        assert_eq!(field.placeholder, "Email");
        assert_eq!(
            field.validation.required.as_deref(),
            Some("email is required")
        );
        assert!(field.dependency.is_none());
    }

    #[test]
    fn test_dependency() {
        let field = FieldDescriptor::new("discount", FieldType::Number)
            .depends_on("hasDiscount", "Yes");

        let dep = field.dependency.expect("dependency set");
        assert_eq!(dep.controlling_field, "hasDiscount");
        assert_eq!(dep.required_value, "Yes");
    }

    #[test]
    fn test_display_label_falls_back_to_placeholder() {
        let field = FieldDescriptor::new("phone", FieldType::Phone).placeholder("Phone");
        assert_eq!(field.display_label(), "Phone");

        let labeled = field.label("Phone Number");
        assert_eq!(labeled.display_label(), "Phone Number");
    }

    #[test]
    fn test_dynamic_options_flag() {
        let field = FieldDescriptor::new("productCategoryId", FieldType::Select).dynamic_options();
        assert!(field.has_dynamic_options());

        let fixed = FieldDescriptor::new("hasDiscount", FieldType::Select)
            .static_options(vec!["No", "Yes"]);
        assert!(!fixed.has_dynamic_options());
    }
}
