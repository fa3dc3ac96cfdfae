use crate::domain::EmailAddress;

/// Subscriber selected for delivery
#[derive(Debug)]
pub struct ActiveSubscriber {
    pub email: EmailAddress,
}

/// Subscription status of a subscriber row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriberStatus {
    Active,
    Other(String),
}

impl SubscriberStatus {
    /// Parse subscription status; only the exact value `active` selects a row for delivery
    pub fn parse(status: &str) -> Self {
        if status == "active" {
            Self::Active
        } else {
            Self::Other(status.to_owned())
        }
    }

    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}
