use serde::{Deserialize, Serialize};

/// A visitor inquiry as stored by the remote API.
///
/// Older records use `fullname`/`phonenumber`/`description` and `_id`; newer
/// ones use `name`/`phone_number`/`message` and `id`. The accessors reconcile
/// both shapes so consumers never branch on wire history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Inquiry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub phonenumber: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    /// Server-authoritative; never written by this application.
    #[serde(default)]
    pub status: Option<String>,
    /// Server-authoritative; never written by this application.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Inquiry {
    /// True when either the current or the legacy identifier matches.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id) || self.legacy_id.as_deref() == Some(id)
    }

    /// Display name regardless of wire vintage.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.fullname.as_deref())
            .unwrap_or("—")
    }

    /// Phone number regardless of wire vintage.
    pub fn display_phone(&self) -> &str {
        self.phone_number
            .as_deref()
            .or(self.phonenumber.as_deref())
            .unwrap_or("—")
    }

    /// Message body regardless of wire vintage.
    pub fn display_message(&self) -> &str {
        self.message
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("")
    }
}

/// Wire payload for creating an inquiry (`POST /inquiry`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewInquiry {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub message: String,
}

/// Partial wire payload for updating an inquiry (`PUT /inquiry/{id}`).
///
/// The API accepts updates but no page flow drives them; the fields mirror
/// [`NewInquiry`] with everything optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InquiryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A downloadable brochure shown on the brochures page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Brochure {
    pub title: &'static str,
    pub cover: &'static str,
    pub link: &'static str,
}
