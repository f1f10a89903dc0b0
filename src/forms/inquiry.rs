//! Visitor inquiry forms.
//!
//! Two variants share the validation rules: the standalone contact form
//! (with a free-text message) and the inline product-detail dialog (which
//! synthesizes its message from the product name). Validation happens
//! entirely before any network call; field errors are rendered inline and
//! never leave the form.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::inquiry::NewInquiry;

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_fullname(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "Full name is required"));
    }
    if value.chars().count() > 100 {
        return Err(field_error("length", "Full name cannot exceed 100 characters"));
    }
    Ok(())
}

fn validate_phonenumber(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "Phone number is required"));
    }
    if value.chars().count() > 20 {
        return Err(field_error("length", "Phone number cannot exceed 20 characters"));
    }
    Ok(())
}

// The format check only applies to non-empty input, so a blank field reports
// "required" rather than "invalid format".
fn validate_email_field(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(field_error("required", "Email is required"));
    }
    if !validator::ValidateEmail::validate_email(&trimmed) {
        return Err(field_error("email", "Invalid email address"));
    }
    if value.chars().count() > 100 {
        return Err(field_error("length", "Email cannot exceed 100 characters"));
    }
    Ok(())
}

fn validate_description(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "Message is required"));
    }
    if value.chars().count() > 1000 {
        return Err(field_error("length", "Message cannot exceed 1000 characters"));
    }
    Ok(())
}

/// Raw contact-form input, field names matching the rendered form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct InquiryForm {
    #[validate(custom(function = validate_fullname))]
    pub fullname: String,
    #[validate(custom(function = validate_phonenumber))]
    pub phonenumber: String,
    #[validate(custom(function = validate_email_field))]
    pub email: String,
    #[validate(custom(function = validate_description))]
    pub description: String,
}

impl InquiryForm {
    /// True when nothing has been entered since the form's defaults.
    /// Pristine input blocks submission outright.
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}

/// Raw inline product-inquiry dialog input. No message field: the payload
/// synthesizes one from the product name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct ProductInquiryForm {
    #[validate(custom(function = validate_fullname))]
    pub fullname: String,
    #[validate(custom(function = validate_phonenumber))]
    pub phonenumber: String,
    #[validate(custom(function = validate_email_field))]
    pub email: String,
}

impl ProductInquiryForm {
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }
}

/// Validated contact-form data, ready for the wire transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryFormPayload {
    form: InquiryForm,
}

impl InquiryFormPayload {
    /// Wire payload: local field names mapped to the API contract, all
    /// fields trimmed, email lower-cased.
    pub fn into_new_inquiry(self) -> NewInquiry {
        NewInquiry {
            name: self.form.fullname.trim().to_string(),
            phone_number: self.form.phonenumber.trim().to_string(),
            email: self.form.email.trim().to_lowercase(),
            message: self.form.description.trim().to_string(),
        }
    }
}

/// Validated dialog data; the message is derived from the product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInquiryFormPayload {
    form: ProductInquiryForm,
}

impl ProductInquiryFormPayload {
    pub fn into_new_inquiry(self, product_name: &str) -> NewInquiry {
        let product_name = if product_name.trim().is_empty() {
            "Product"
        } else {
            product_name
        };
        NewInquiry {
            name: self.form.fullname.trim().to_string(),
            phone_number: self.form.phonenumber.trim().to_string(),
            email: self.form.email.trim().to_lowercase(),
            message: format!("Inquiry for product: {product_name}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InquiryFormError {
    /// Nothing was entered; submission is blocked without field errors.
    #[error("inquiry form is unchanged")]
    Pristine,
    #[error("inquiry form validation failed")]
    Validation(ValidationErrors),
}

impl From<ValidationErrors> for InquiryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl InquiryFormError {
    /// One message per failing field, for inline rendering.
    pub fn field_errors(&self) -> HashMap<String, String> {
        match self {
            InquiryFormError::Pristine => HashMap::new(),
            InquiryFormError::Validation(errors) => errors
                .field_errors()
                .into_iter()
                .filter_map(|(field, field_errors)| {
                    let first = field_errors.first()?;
                    let message = first
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| first.code.to_string());
                    Some((field.to_string(), message))
                })
                .collect(),
        }
    }
}

impl TryFrom<InquiryForm> for InquiryFormPayload {
    type Error = InquiryFormError;

    fn try_from(value: InquiryForm) -> Result<Self, Self::Error> {
        if value.is_pristine() {
            return Err(InquiryFormError::Pristine);
        }
        value.validate()?;
        Ok(Self { form: value })
    }
}

impl TryFrom<ProductInquiryForm> for ProductInquiryFormPayload {
    type Error = InquiryFormError;

    fn try_from(value: ProductInquiryForm) -> Result<Self, Self::Error> {
        if value.is_pristine() {
            return Err(InquiryFormError::Pristine);
        }
        value.validate()?;
        Ok(Self { form: value })
    }
}
