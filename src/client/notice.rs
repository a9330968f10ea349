//! Transient user notifications

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub raised_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Notices {
    items: Vec<Notice>,
    lifetime: Duration,
}

impl Default for Notices {
    fn default() -> Self {
        Self::new(Duration::milliseconds(4000))
    }
}

impl Notices {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: Vec::new(),
            lifetime,
        }
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Success, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Error, text.into());
    }

    /// Expired notices are dropped whenever a new one is raised.
    fn push(&mut self, level: NoticeLevel, text: String) {
        let now = Utc::now();
        self.expire(now);
        self.items.push(Notice {
            level,
            text,
            raised_at: now,
        });
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn all(&self) -> &[Notice] {
        &self.items
    }

    /// Drops notices older than the configured lifetime.
    pub fn expire(&mut self, now: DateTime<Utc>) {
        let lifetime = self.lifetime;
        self.items.retain(|notice| now - notice.raised_at < lifetime);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_old_notices() {
        let mut notices = Notices::new(Duration::seconds(4));
        notices.error("Failed to load foods");
        notices.success("Food added successfully!");
        assert_eq!(notices.latest().map(|n| n.level), Some(NoticeLevel::Success));

        let now = Utc::now();
        notices.expire(now);
        assert_eq!(notices.all().len(), 2);

        notices.expire(now + Duration::seconds(5));
        assert!(notices.all().is_empty());
    }

    #[test]
    fn raising_a_notice_drops_expired_ones() {
        let mut notices = Notices::new(Duration::zero());
        for _ in 0..10 {
            notices.error("Failed to load foods");
        }
        assert_eq!(notices.all().len(), 1);
        assert_eq!(notices.latest().map(|n| n.text.as_str()), Some("Failed to load foods"));
    }
}
