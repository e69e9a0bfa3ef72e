//! Action boundary for bookmark forms.
//!
//! Every failure is caught here and turned into an [`ActionResult`]. Validation,
//! authorization and not-found failures keep their message; anything else is
//! logged and replaced with a generic one.

use tracing::error;

use crate::services::bookmark_service::BookmarkServiceTrait;
use crate::types::action::{ActionResult, FailureKind};
use crate::types::bookmark::BookmarkForm;
use crate::types::errors::BookmarkError;
use crate::types::user::User;

fn to_result<T>(outcome: Result<T, BookmarkError>, action: &str, fallback: &str) -> ActionResult {
    match outcome {
        Ok(_) => ActionResult::ok(),
        Err(BookmarkError::Validation(e)) => ActionResult::failed(FailureKind::Validation, e.to_string()),
        Err(BookmarkError::Unauthorized) => {
            ActionResult::failed(FailureKind::Unauthorized, BookmarkError::Unauthorized.to_string())
        }
        Err(BookmarkError::NotFound(_)) => ActionResult::failed(FailureKind::NotFound, "Bookmark not found"),
        Err(e) => {
            error!(action, error = %e, "bookmark action failed");
            ActionResult::failed(FailureKind::Unexpected, fallback)
        }
    }
}

pub fn add_bookmark_action<S: BookmarkServiceTrait + ?Sized>(
    service: &S,
    caller: Option<&User>,
    form: &BookmarkForm,
) -> ActionResult {
    to_result(
        service.create_bookmark(caller, &form.title, &form.url),
        "add",
        "Failed to add bookmark",
    )
}

pub fn update_bookmark_action<S: BookmarkServiceTrait + ?Sized>(
    service: &S,
    caller: Option<&User>,
    id: &str,
    form: &BookmarkForm,
) -> ActionResult {
    to_result(
        service.update_bookmark(caller, id, &form.title, &form.url),
        "update",
        "Failed to update bookmark",
    )
}

pub fn delete_bookmark_action<S: BookmarkServiceTrait + ?Sized>(
    service: &S,
    caller: Option<&User>,
    id: &str,
) -> ActionResult {
    to_result(
        service.delete_bookmark(caller, id),
        "delete",
        "Failed to delete bookmark",
    )
}
