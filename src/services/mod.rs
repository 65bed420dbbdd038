pub mod announcements;
pub mod dates;
pub mod metrics;
