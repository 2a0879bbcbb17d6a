//! Traits shared by persisted records.

use uuid::Uuid;

pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Records that belong to a single user.
pub trait Owned {
    fn owner(&self) -> Uuid;

    fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner() == user_id
    }
}

/// Compact label used in log events.
pub trait Displayable {
    fn display_label(&self) -> String;
}
