pub mod auth;
pub mod checklist;
pub mod goals;
pub mod settings;
pub mod tasks;

use chrono::{Local, NaiveDate};
use taskdeck_core::error::CoreError;
use taskdeck_core::types::DbId;
use taskdeck_db::repositories::UserRepo;
use taskdeck_db::DbPool;

use crate::error::{AppError, AppResult};

/// Fail with `OWNER_NOT_FOUND` unless the user exists.
pub(crate) async fn ensure_owner_exists(pool: &DbPool, user_id: DbId) -> AppResult<()> {
    if UserRepo::exists(pool, user_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::OwnerNotFound(user_id)))
    }
}

/// The server's local calendar day, used for due-date defaults and the
/// default calendar month.
pub(crate) fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
