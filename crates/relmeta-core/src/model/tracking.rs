use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// ChangeTrackingStrategy
///
/// How value changes on instances of an entity type are detected.
/// Everything other than `Snapshot` relies on instance notifications.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum ChangeTrackingStrategy {
    #[default]
    Snapshot,
    ChangedNotifications,
    ChangingAndChangedNotifications,
    ChangingAndChangedNotificationsWithOriginalValues,
}

impl ChangeTrackingStrategy {
    #[must_use]
    pub const fn is_notifying(self) -> bool {
        !matches!(self, Self::Snapshot)
    }

    /// Whether snapshots of current values are taken eagerly on attach.
    #[must_use]
    pub const fn uses_eager_snapshots(self) -> bool {
        matches!(self, Self::Snapshot | Self::ChangedNotifications)
    }
}
