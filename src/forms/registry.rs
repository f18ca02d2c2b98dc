//! Static form registries
//!
//! One ordered descriptor table per logical form. Registries are pure data:
//! they expose read-only ordered sequences and have no lifecycle beyond
//! first access.

use once_cell::sync::Lazy;

use super::field::{FieldDescriptor, FieldType, ValidationRules};

/// Ordered, read-only sequence of field descriptors for one form
pub type FormRegistry = Vec<FieldDescriptor>;

const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";
const PHONE_PATTERN: &str = r"01(0|1|2|5)\d{8}";

fn assert_unique_names(registry: &FormRegistry) -> bool {
    let mut names: Vec<&str> = registry.iter().map(|f| f.name).collect();
    names.sort_unstable();
    names.windows(2).all(|w| w[0] != w[1])
}

/// Account registration form
pub static REGISTER_FORM: Lazy<FormRegistry> = Lazy::new(|| {
    let registry = vec![
        FieldDescriptor::new("firstName", FieldType::Text)
            .placeholder("First Name")
            .validation(
                ValidationRules::required("firstName is required").length(Some(3), Some(20)),
            ),
        FieldDescriptor::new("secondName", FieldType::Text)
            .placeholder("Second Name")
            .validation(
                ValidationRules::required("second name is required").length(Some(3), Some(20)),
            ),
        FieldDescriptor::new("email", FieldType::Email)
            .placeholder("Email")
            .validation(
                ValidationRules::required("email is required")
                    .pattern(EMAIL_PATTERN, "invalid email address"),
            ),
        FieldDescriptor::new("phone", FieldType::Phone)
            .placeholder("Phone")
            .validation(
                ValidationRules::required("phone is required")
                    .length(None, Some(11))
                    .pattern(PHONE_PATTERN, "invalid phone number"),
            ),
        FieldDescriptor::new("password", FieldType::Password)
            .placeholder("Password")
            .validation(
                ValidationRules::required("password is required").length(Some(8), Some(18)),
            ),
        FieldDescriptor::new("confirmedPassword", FieldType::Password)
            .placeholder("Confirm Password")
            .validation(
                ValidationRules::required("confirm password is required").length(Some(8), Some(18)),
            ),
        FieldDescriptor::new("address", FieldType::Text)
            .placeholder("Address")
            .validation(ValidationRules::required("address is required").length(Some(6), None)),
        FieldDescriptor::new("image", FieldType::File)
            .placeholder("Profile Image")
            .validation(ValidationRules::required("profile image is required")),
    ];
    debug_assert!(assert_unique_names(&registry));
    registry
});

/// Password reset form (OTP + new password)
pub static RESET_FORM: Lazy<FormRegistry> = Lazy::new(|| {
    let registry = vec![
        FieldDescriptor::new("otp", FieldType::Number)
            .placeholder("otp code")
            .validation(
                ValidationRules::required("otp code is required")
                    .length(Some(6), Some(6))
                    .pattern(r"^[0-9]{6}$", "invalid otp code"),
            ),
        FieldDescriptor::new("newPassword", FieldType::Password)
            .placeholder("Password")
            .validation(
                ValidationRules::required("password is required").length(Some(8), Some(18)),
            ),
        FieldDescriptor::new("confirmedNewPassword", FieldType::Password)
            .placeholder("Confirm Password")
            .validation(
                ValidationRules::required("confirm password is required").length(Some(8), Some(18)),
            ),
    ];
    debug_assert!(assert_unique_names(&registry));
    registry
});

/// Profile update form
pub static PROFILE_FORM: Lazy<FormRegistry> = Lazy::new(|| {
    let registry = vec![
        FieldDescriptor::new("firstName", FieldType::Text)
            .placeholder("First Name")
            .validation(
                ValidationRules::required("firstName is required").length(Some(3), Some(20)),
            ),
        FieldDescriptor::new("secondName", FieldType::Text)
            .placeholder("Second Name")
            .validation(
                ValidationRules::required("second name is required").length(Some(3), Some(20)),
            ),
        FieldDescriptor::new("phone", FieldType::Number)
            .placeholder("Phone")
            .validation(
                ValidationRules::required("phone is required")
                    .length(None, Some(11))
                    .pattern(PHONE_PATTERN, "invalid phone number"),
            ),
        FieldDescriptor::new("address", FieldType::Text)
            .placeholder("Address")
            .validation(ValidationRules::required("address is required").length(Some(6), None)),
        FieldDescriptor::new("image", FieldType::File)
            .placeholder("Profile Image")
            .validation(ValidationRules::required("profile image is required")),
    ];
    debug_assert!(assert_unique_names(&registry));
    registry
});

/// Contact-us form
pub static CONTACT_FORM: Lazy<FormRegistry> = Lazy::new(|| {
    let registry = vec![
        FieldDescriptor::new("fullName", FieldType::Text)
            .placeholder("Full Name")
            .validation(
                ValidationRules::required("Full Name is required").length(Some(3), Some(50)),
            ),
        FieldDescriptor::new("email", FieldType::Email)
            .placeholder("Email")
            .validation(
                ValidationRules::required("email is required")
                    .pattern(EMAIL_PATTERN, "invalid email address"),
            ),
        FieldDescriptor::new("message", FieldType::Textarea)
            .placeholder("Message")
            .validation(ValidationRules::required("message is required").length(Some(20), None)),
    ];
    debug_assert!(assert_unique_names(&registry));
    registry
});

/// Dashboard product create/edit form
///
/// The discount field renders only while `hasDiscount` is "Yes"; the
/// category select resolves its options from the upstream category list.
pub static PRODUCT_FORM: Lazy<FormRegistry> = Lazy::new(|| {
    let registry = vec![
        FieldDescriptor::new("image", FieldType::File)
            .label("Product Image")
            .placeholder("Product Image")
            .validation(ValidationRules::required("Product Image is required")),
        FieldDescriptor::new("name", FieldType::Text)
            .label("Product Name")
            .placeholder("Product Name")
            .validation(ValidationRules::required("Product Name is required")),
        FieldDescriptor::new("productCategoryId", FieldType::Select)
            .label("Product Category")
            .placeholder("Product Category")
            .dynamic_options()
            .validation(ValidationRules::required("Product Category is required")),
        FieldDescriptor::new("price", FieldType::Number)
            .label("Product Price")
            .placeholder("Product Price")
            .validation(ValidationRules::required("Product Price is required")),
        FieldDescriptor::new("hasDiscount", FieldType::Select)
            .label("has discount ?")
            .placeholder("Product Category")
            .default_value("Yes")
            .static_options(vec!["No", "Yes"])
            .validation(ValidationRules::required("Product Category is required")),
        FieldDescriptor::new("discount", FieldType::Number)
            .label("Product Discount")
            .placeholder("Discount")
            .depends_on("hasDiscount", "Yes")
            .validation(ValidationRules::required("Product Discount is required")),
        FieldDescriptor::new("description", FieldType::Editor)
            .label("Product Description")
            .placeholder("Product Description")
            .validation(ValidationRules::required("Product Description is required")),
    ];
    debug_assert!(assert_unique_names(&registry));
    registry
});
