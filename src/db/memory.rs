use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{AnnouncementStore, TeacherDirectory, UpdateOutcome};
use crate::models::announcement::{Announcement, AnnouncementPatch, NewAnnouncement};

/// Process-local store for tests and `STORE=memory` runs. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    announcements: RwLock<HashMap<Uuid, Announcement>>,
    teachers: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn with_teachers<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            announcements: RwLock::default(),
            teachers: RwLock::new(usernames.into_iter().map(Into::into).collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.announcements.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.announcements.read().await.is_empty()
    }
}

#[async_trait]
impl AnnouncementStore for MemoryStore {
    async fn list_active(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Announcement>> {
        let mut active: Vec<Announcement> = self
            .announcements
            .read()
            .await
            .values()
            .filter(|a| a.is_active_at(now))
            .cloned()
            .collect();
        active.sort_by_key(|a| a.expiration_date);
        Ok(active)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Announcement>> {
        let mut all: Vec<Announcement> = self.announcements.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn insert(&self, new: NewAnnouncement) -> anyhow::Result<Announcement> {
        let announcement = Announcement {
            id: Uuid::new_v4(),
            message: new.message,
            start_date: new.start_date,
            expiration_date: new.expiration_date,
            created_by: new.created_by,
            created_at: new.created_at,
        };
        self.announcements
            .write()
            .await
            .insert(announcement.id, announcement.clone());
        Ok(announcement)
    }

    async fn update(&self, id: Uuid, patch: &AnnouncementPatch) -> anyhow::Result<UpdateOutcome> {
        let mut announcements = self.announcements.write().await;
        let Some(announcement) = announcements.get_mut(&id) else {
            return Ok(UpdateOutcome::NotFound);
        };
        if patch.expiration_precedes_stored_start(announcement) {
            return Ok(UpdateOutcome::ExpirationBeforeStart);
        }
        patch.apply(announcement);
        Ok(UpdateOutcome::Updated(announcement.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.announcements.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl TeacherDirectory for MemoryStore {
    async fn exists(&self, username: &str) -> anyhow::Result<bool> {
        Ok(self.teachers.read().await.contains(username))
    }
}
