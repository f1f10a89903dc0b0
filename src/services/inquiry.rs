//! Inquiry submission and the admin inquiry list.
//!
//! Submission walks a fixed lifecycle: pristine check, local validation,
//! wire transform, a single create request, then either a success
//! affordance (with a view-specific auto-dismiss delay) or a failure banner
//! whose message prefers structured server feedback. Validation failures
//! never reach the network.
//!
//! The admin delete path is optimistic: the cached list is edited before
//! the server answers and restored verbatim when it refuses.

use std::collections::HashMap;

use serde::Serialize;

use crate::api::{InquiryReader, InquiryWriter};
use crate::cache::{CacheKey, CachedValue, QueryCache};
use crate::domain::inquiry::{Inquiry, InquiryUpdate};
use crate::domain::types::InquiryId;
use crate::forms::inquiry::{
    InquiryForm, InquiryFormError, InquiryFormPayload, ProductInquiryForm,
    ProductInquiryFormPayload,
};

use super::{ServiceError, ServiceResult};

/// How long the standalone contact form shows its confirmation.
pub const CONTACT_SUCCESS_DISMISS_MS: u64 = 5000;
/// How long the inline product-inquiry dialog shows its confirmation
/// before auto-closing.
pub const DIALOG_SUCCESS_DISMISS_MS: u64 = 2000;

/// Terminal state of one submission pass.
///
/// `Rejected` re-renders the form with inline errors (empty when the input
/// was pristine); `Failed` keeps the visitor's raw input so they can retry
/// without retyping.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Succeeded { dismiss_after_ms: u64 },
    Rejected { field_errors: HashMap<String, String> },
    Failed { message: String },
}

/// Display-ready row for the admin inquiry table, with the legacy and
/// current field shapes already reconciled.
#[derive(Debug, Serialize, PartialEq)]
pub struct InquiryRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub created_at: String,
}

impl From<&Inquiry> for InquiryRow {
    fn from(inquiry: &Inquiry) -> Self {
        Self {
            id: inquiry
                .id
                .as_deref()
                .or(inquiry.legacy_id.as_deref())
                .unwrap_or_default()
                .to_string(),
            name: inquiry.display_name().to_string(),
            phone: inquiry.display_phone().to_string(),
            email: inquiry.email.clone().unwrap_or_default(),
            subject: inquiry.subject.clone().unwrap_or_default(),
            message: inquiry.display_message().to_string(),
            status: inquiry.status.clone().unwrap_or_default(),
            created_at: inquiry
                .created_at
                .as_deref()
                .map(format_received)
                .unwrap_or_default(),
        }
    }
}

/// Formats an RFC 3339 timestamp for the admin table, falling back to the
/// raw value when the API hands back something else.
fn format_received(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => timestamp.format("%d %b %Y %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn rejected(error: InquiryFormError) -> SubmissionOutcome {
    SubmissionOutcome::Rejected {
        field_errors: error.field_errors(),
    }
}

/// Submits the standalone contact form.
///
/// On success the inquiry-list cache is invalidated so the next admin read
/// reflects the new entry.
pub async fn submit_contact_inquiry<A>(
    form: InquiryForm,
    api: &A,
    cache: &QueryCache,
) -> SubmissionOutcome
where
    A: InquiryWriter,
{
    let payload = match InquiryFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(error) => return rejected(error),
    };

    match api.create_inquiry(&payload.into_new_inquiry()).await {
        Ok(()) => {
            cache.invalidate(&CacheKey::Inquiries);
            SubmissionOutcome::Succeeded {
                dismiss_after_ms: CONTACT_SUCCESS_DISMISS_MS,
            }
        }
        Err(e) => {
            log::error!("Failed to create inquiry: {e}");
            SubmissionOutcome::Failed {
                message: e.human_message(),
            }
        }
    }
}

/// Submits the inline product-inquiry dialog; the message is synthesized
/// from the product name.
pub async fn submit_product_inquiry<A>(
    form: ProductInquiryForm,
    product_name: &str,
    api: &A,
    cache: &QueryCache,
) -> SubmissionOutcome
where
    A: InquiryWriter,
{
    let payload = match ProductInquiryFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(error) => return rejected(error),
    };

    match api.create_inquiry(&payload.into_new_inquiry(product_name)).await {
        Ok(()) => {
            cache.invalidate(&CacheKey::Inquiries);
            SubmissionOutcome::Succeeded {
                dismiss_after_ms: DIALOG_SUCCESS_DISMISS_MS,
            }
        }
        Err(e) => {
            log::error!("Failed to create product inquiry: {e}");
            SubmissionOutcome::Failed {
                message: e.human_message(),
            }
        }
    }
}

/// Lists inquiries for the admin view through the query cache.
pub async fn list_inquiries<A>(api: &A, cache: &QueryCache) -> ServiceResult<Vec<Inquiry>>
where
    A: InquiryReader,
{
    if let Some(CachedValue::Inquiries(inquiries)) = cache.get(&CacheKey::Inquiries) {
        return Ok(inquiries);
    }
    let inquiries = match api.list_inquiries().await {
        Ok(inquiries) => inquiries,
        Err(e) => {
            log::error!("Failed to list inquiries: {e}");
            return Err(e.into());
        }
    };
    cache.put(CacheKey::Inquiries, CachedValue::Inquiries(inquiries.clone()));
    Ok(inquiries)
}

/// Reads one inquiry through its per-id cache entry.
pub async fn get_inquiry<A>(
    id: &str,
    api: &A,
    cache: &QueryCache,
) -> ServiceResult<Option<Inquiry>>
where
    A: InquiryReader,
{
    let id = match InquiryId::new(id) {
        Ok(id) => id,
        Err(_) => return Ok(None),
    };

    let key = CacheKey::Inquiry(id.to_string());
    if let Some(CachedValue::Inquiry(inquiry)) = cache.get(&key) {
        return Ok(Some(inquiry));
    }
    let inquiry = match api.get_inquiry(&id).await {
        Ok(inquiry) => inquiry,
        Err(e) => {
            log::error!("Failed to get inquiry {id}: {e}");
            return Err(e.into());
        }
    };
    if let Some(inquiry) = &inquiry {
        cache.put(key, CachedValue::Inquiry(inquiry.clone()));
    }
    Ok(inquiry)
}

/// Applies a partial update to an inquiry. No page flow drives this yet;
/// the cached copies are refreshed so a future admin edit stays coherent.
pub async fn update_inquiry<A>(
    id: &str,
    changes: &InquiryUpdate,
    api: &A,
    cache: &QueryCache,
) -> ServiceResult<Option<Inquiry>>
where
    A: InquiryWriter,
{
    let id = match InquiryId::new(id) {
        Ok(id) => id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    let updated = match api.update_inquiry(&id, changes).await {
        Ok(updated) => updated,
        Err(e) => {
            log::error!("Failed to update inquiry {id}: {e}");
            return Err(e.into());
        }
    };

    if let Some(inquiry) = &updated {
        cache.put(
            CacheKey::Inquiry(id.to_string()),
            CachedValue::Inquiry(inquiry.clone()),
        );
    }
    cache.invalidate(&CacheKey::Inquiries);
    Ok(updated)
}

/// Deletes an inquiry with an optimistic cache update.
///
/// The cached list is snapshotted and edited before the request is issued;
/// a server failure restores the snapshot verbatim. The snapshot lives in
/// this call's frame, so overlapping deletes cannot roll back each other's
/// edits. Whatever the outcome, the list key is left stale so the next
/// read reconciles with the server.
pub async fn delete_inquiry<A>(id: &str, api: &A, cache: &QueryCache) -> ServiceResult<()>
where
    A: InquiryWriter,
{
    let id = match InquiryId::new(id) {
        Ok(id) => id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    let list_snapshot = cache.snapshot(&CacheKey::Inquiries);
    if let Some(CachedValue::Inquiries(inquiries)) = cache.peek(&CacheKey::Inquiries) {
        let remaining: Vec<Inquiry> = inquiries
            .into_iter()
            .filter(|inquiry| !inquiry.matches_id(id.as_str()))
            .collect();
        cache.put(CacheKey::Inquiries, CachedValue::Inquiries(remaining));
    }
    cache.remove(&CacheKey::Inquiry(id.to_string()));

    let result = api.delete_inquiry(&id).await;
    let outcome = match result {
        Ok(()) => {
            // Idempotent: the optimistic pass already dropped this key.
            cache.remove(&CacheKey::Inquiry(id.to_string()));
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete inquiry {id}: {e}");
            if let Some(snapshot) = list_snapshot {
                cache.restore(CacheKey::Inquiries, snapshot);
            }
            Err(e.into())
        }
    };

    cache.invalidate(&CacheKey::Inquiries);
    outcome
}
