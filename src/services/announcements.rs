use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    db::{AnnouncementStore, TeacherDirectory, UpdateOutcome},
    error::AppError,
    models::{
        announcement::{
            Announcement, AnnouncementPatch, CreateAnnouncementRequest, NewAnnouncement,
            UpdateAnnouncementRequest,
        },
        auth::AuthContext,
    },
    services::{dates::parse_timestamp, metrics},
};

pub const EXPIRATION_REQUIRED: &str = "Expiration date is required";
pub const INVALID_DATE: &str = "Invalid date format";
pub const EXPIRATION_NOT_FUTURE: &str = "Expiration date must be in the future";
pub const START_NOT_BEFORE_EXPIRATION: &str = "Start date must be before expiration date";
pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const NO_FIELDS: &str = "No fields to update";
pub const INVALID_ID: &str = "Invalid announcement ID";
pub const NOT_FOUND: &str = "Announcement not found";

#[derive(Clone)]
pub struct AnnouncementService {
    store: Arc<dyn AnnouncementStore>,
    teachers: Arc<dyn TeacherDirectory>,
}

impl AnnouncementService {
    pub fn new(store: Arc<dyn AnnouncementStore>, teachers: Arc<dyn TeacherDirectory>) -> Self {
        Self { store, teachers }
    }

    /// Announcements currently on display. No authentication.
    pub async fn list_active(&self) -> Result<Vec<Announcement>, AppError> {
        Ok(self.store.list_active(Utc::now()).await?)
    }

    /// Every announcement, newest first.
    pub async fn list_all(&self, auth: &AuthContext) -> Result<Vec<Announcement>, AppError> {
        self.authorize(auth, "list").await?;
        Ok(self.store.list_all().await?)
    }

    /// The actor is the request's `created_by`; missing or blank is refused
    /// like an unknown teacher.
    pub async fn create(&self, req: &CreateAnnouncementRequest) -> Result<Announcement, AppError> {
        let auth = req
            .created_by
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(AuthContext::new)
            .ok_or_else(|| {
                metrics::AUTH_REJECTIONS.with_label_values(&["create"]).inc();
                AppError::Unauthorized
            })?;
        self.authorize(&auth, "create").await?;

        let new = validate_create(req, &auth, Utc::now())?;
        let announcement = self.store.insert(new).await?;

        metrics::ANNOUNCEMENTS_CREATED.inc();
        tracing::info!("announcement {} created by {}", announcement.id, auth.username);
        Ok(announcement)
    }

    /// Apply a partial update. An expiration supplied without a start date is
    /// checked against the stored start date; a start date supplied on its own
    /// is not checked against the stored expiration date.
    pub async fn update(
        &self,
        id: &str,
        auth: &AuthContext,
        req: &UpdateAnnouncementRequest,
    ) -> Result<Announcement, AppError> {
        self.authorize(auth, "update").await?;

        let patch = validate_update(req, Utc::now())?;
        let id = parse_id(id)?;

        match self.store.update(id, &patch).await {
            Ok(UpdateOutcome::Updated(announcement)) => {
                metrics::ANNOUNCEMENTS_UPDATED.inc();
                tracing::info!("announcement {id} updated by {}", auth.username);
                Ok(announcement)
            }
            Ok(UpdateOutcome::NotFound) => Err(AppError::not_found(NOT_FOUND)),
            Ok(UpdateOutcome::ExpirationBeforeStart) => {
                Err(AppError::bad_request(START_NOT_BEFORE_EXPIRATION))
            }
            Err(e) => {
                tracing::warn!("update of announcement {id} failed: {e:#}");
                Err(AppError::bad_request(INVALID_ID))
            }
        }
    }

    pub async fn delete(&self, id: &str, auth: &AuthContext) -> Result<(), AppError> {
        self.authorize(auth, "delete").await?;

        let id = parse_id(id)?;

        match self.store.delete(id).await {
            Ok(true) => {
                metrics::ANNOUNCEMENTS_DELETED.inc();
                tracing::info!("announcement {id} deleted by {}", auth.username);
                Ok(())
            }
            Ok(false) => Err(AppError::not_found(NOT_FOUND)),
            Err(e) => {
                tracing::warn!("delete of announcement {id} failed: {e:#}");
                Err(AppError::bad_request(INVALID_ID))
            }
        }
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        self.store.ping().await
    }

    async fn authorize(&self, auth: &AuthContext, operation: &'static str) -> Result<(), AppError> {
        if self.teachers.exists(&auth.username).await? {
            return Ok(());
        }
        metrics::AUTH_REJECTIONS.with_label_values(&[operation]).inc();
        tracing::warn!("{operation}: unknown teacher {:?}", auth.username);
        Err(AppError::Unauthorized)
    }
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::bad_request(INVALID_ID))
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    parse_timestamp(raw).ok_or_else(|| AppError::bad_request(INVALID_DATE))
}

fn parse_expiration(raw: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, AppError> {
    let expiration = parse_date(raw)?;
    if expiration <= now {
        return Err(AppError::bad_request(EXPIRATION_NOT_FUTURE));
    }
    Ok(expiration)
}

fn ensure_start_before(start: DateTime<Utc>, expiration: DateTime<Utc>) -> Result<(), AppError> {
    if start >= expiration {
        return Err(AppError::bad_request(START_NOT_BEFORE_EXPIRATION));
    }
    Ok(())
}

fn ensure_message(message: &str) -> Result<(), AppError> {
    if message.trim().is_empty() {
        return Err(AppError::bad_request(MESSAGE_REQUIRED));
    }
    Ok(())
}

/// Check a create request against `now`. Date rules run first, in the
/// order clients rely on for their error messages.
pub fn validate_create(
    req: &CreateAnnouncementRequest,
    auth: &AuthContext,
    now: DateTime<Utc>,
) -> Result<NewAnnouncement, AppError> {
    let raw_expiration = req
        .expiration_date
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::bad_request(EXPIRATION_REQUIRED))?;
    let expiration_date = parse_expiration(raw_expiration, now)?;

    // A blank start date means "show immediately".
    let start_date = match req.start_date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => {
            let start = parse_date(raw)?;
            ensure_start_before(start, expiration_date)?;
            Some(start)
        }
        None => None,
    };

    let message = req.message.as_deref().unwrap_or_default();
    ensure_message(message)?;

    Ok(NewAnnouncement {
        message: message.to_string(),
        start_date,
        expiration_date,
        created_by: auth.username.clone(),
        created_at: now,
    })
}

/// Check an update request against `now` and turn it into a patch.
pub fn validate_update(
    req: &UpdateAnnouncementRequest,
    now: DateTime<Utc>,
) -> Result<AnnouncementPatch, AppError> {
    if req.is_empty() {
        return Err(AppError::bad_request(NO_FIELDS));
    }

    let expiration_date = req
        .expiration_date
        .as_deref()
        .map(|raw| parse_expiration(raw, now))
        .transpose()?;
    // A blank start date clears it, as on create where it means "show immediately".
    let start_date = match req.start_date.as_deref().map(str::trim) {
        Some("") => Some(None),
        Some(raw) => Some(Some(parse_date(raw)?)),
        None => None,
    };

    if let (Some(Some(start)), Some(expiration)) = (start_date, expiration_date) {
        ensure_start_before(start, expiration)?;
    }

    if let Some(message) = &req.message {
        ensure_message(message)?;
    }

    Ok(AnnouncementPatch {
        message: req.message.clone(),
        start_date,
        expiration_date,
    })
}
