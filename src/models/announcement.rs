use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Announcement {
    pub id: Uuid,
    pub message: String,
    /// `None` means the announcement is shown as soon as it is created.
    pub start_date: Option<DateTime<Utc>>,
    pub expiration_date: DateTime<Utc>,
    pub created_by: String, // teacher username
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    /// Whether the display window contains `now` (both bounds inclusive).
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date >= now && self.start_date.map_or(true, |start| start <= now)
    }
}

/// Body for POST /announcements. Dates arrive as ISO-8601 strings and are
/// validated by the service, so they stay raw here. Missing fields are
/// reported by the service rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAnnouncementRequest {
    pub message: Option<String>,
    pub start_date: Option<String>,
    pub expiration_date: Option<String>,
    pub created_by: Option<String>,
}

/// Body for PUT /announcements/{id}. Absent or null fields are left untouched;
/// a blank `start_date` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAnnouncementRequest {
    pub message: Option<String>,
    pub start_date: Option<String>,
    pub expiration_date: Option<String>,
}

impl UpdateAnnouncementRequest {
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.start_date.is_none() && self.expiration_date.is_none()
    }
}

/// A validated announcement ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub message: String,
    pub start_date: Option<DateTime<Utc>>,
    pub expiration_date: DateTime<Utc>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// A validated partial update. Each `Some` field replaces the stored value;
/// `start_date: Some(None)` removes the start date.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementPatch {
    pub message: Option<String>,
    pub start_date: Option<Option<DateTime<Utc>>>,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl AnnouncementPatch {
    pub fn clears_start(&self) -> bool {
        matches!(self.start_date, Some(None))
    }

    /// True when only the expiration changes and it would land on or before
    /// the stored start date. A start date supplied alone is not checked.
    pub fn expiration_precedes_stored_start(&self, stored: &Announcement) -> bool {
        match (self.expiration_date, self.start_date, stored.start_date) {
            (Some(expiration), None, Some(start)) => start >= expiration,
            _ => false,
        }
    }

    pub fn apply(&self, announcement: &mut Announcement) {
        if let Some(message) = &self.message {
            announcement.message = message.clone();
        }
        if let Some(start) = self.start_date {
            announcement.start_date = start;
        }
        if let Some(expiration) = self.expiration_date {
            announcement.expiration_date = expiration;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(now: DateTime<Utc>) -> Announcement {
        Announcement {
            id: Uuid::new_v4(),
            message: "Exam tomorrow".into(),
            start_date: None,
            expiration_date: now + Duration::hours(24),
            created_by: "teacher1".into(),
            created_at: now,
        }
    }

    #[test]
    fn test_active_window_bounds() {
        let now = Utc::now();
        let mut a = sample(now);
        assert!(a.is_active_at(now));

        a.start_date = Some(now + Duration::minutes(5));
        assert!(!a.is_active_at(now));
        assert!(a.is_active_at(now + Duration::minutes(5)));

        // Expiration is inclusive
        assert!(a.is_active_at(a.expiration_date));
        assert!(!a.is_active_at(a.expiration_date + Duration::seconds(1)));
    }

    #[test]
    fn test_patch_only_touches_supplied_fields() {
        let now = Utc::now();
        let mut a = sample(now);
        let before = a.clone();

        AnnouncementPatch {
            message: Some("Exam moved".into()),
            ..Default::default()
        }
        .apply(&mut a);

        assert_eq!(a.message, "Exam moved");
        assert_eq!(a.start_date, before.start_date);
        assert_eq!(a.expiration_date, before.expiration_date);
        assert_eq!(a.created_at, before.created_at);
        assert_eq!(a.id, before.id);
    }

    #[test]
    fn test_patch_clears_start() {
        let now = Utc::now();
        let mut a = sample(now);
        a.start_date = Some(now + Duration::hours(1));

        let patch = AnnouncementPatch {
            start_date: Some(None),
            ..Default::default()
        };
        assert!(patch.clears_start());
        patch.apply(&mut a);
        assert_eq!(a.start_date, None);
    }

    #[test]
    fn test_expiration_only_patch_checks_stored_start() {
        let now = Utc::now();
        let mut stored = sample(now);
        stored.start_date = Some(now + Duration::hours(2));

        let earlier = AnnouncementPatch {
            expiration_date: Some(now + Duration::hours(1)),
            ..Default::default()
        };
        assert!(earlier.expiration_precedes_stored_start(&stored));

        let equal = AnnouncementPatch {
            expiration_date: stored.start_date,
            ..Default::default()
        };
        assert!(equal.expiration_precedes_stored_start(&stored));

        let later = AnnouncementPatch {
            expiration_date: Some(now + Duration::hours(3)),
            ..Default::default()
        };
        assert!(!later.expiration_precedes_stored_start(&stored));

        // Clearing the start in the same patch lifts the constraint
        let cleared = AnnouncementPatch {
            start_date: Some(None),
            expiration_date: Some(now + Duration::hours(1)),
            ..Default::default()
        };
        assert!(!cleared.expiration_precedes_stored_start(&stored));

        // A start supplied alone is never compared with the stored expiration
        let start_only = AnnouncementPatch {
            start_date: Some(Some(now + Duration::days(30))),
            ..Default::default()
        };
        assert!(!start_only.expiration_precedes_stored_start(&stored));
    }
}
