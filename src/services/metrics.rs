use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

lazy_static! {
    pub static ref ANNOUNCEMENTS_CREATED: IntCounter = register_int_counter!(
        "announcements_created_total",
        "Announcements created"
    ).unwrap();

    pub static ref ANNOUNCEMENTS_UPDATED: IntCounter = register_int_counter!(
        "announcements_updated_total",
        "Announcements updated"
    ).unwrap();

    pub static ref ANNOUNCEMENTS_DELETED: IntCounter = register_int_counter!(
        "announcements_deleted_total",
        "Announcements deleted"
    ).unwrap();

    pub static ref AUTH_REJECTIONS: IntCounterVec = register_int_counter_vec!(
        "announcement_auth_rejections_total",
        "Requests refused because the actor is not a known teacher",
        &["operation"]
    ).unwrap();
}
