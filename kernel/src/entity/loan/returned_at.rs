use time::{Duration, OffsetDateTime};
use vodca::{AsRefln, Fromln};

use crate::entity::IssuedAt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct ReturnedAt(OffsetDateTime);

impl ReturnedAt {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }

    pub fn elapsed_since(&self, issued_at: &IssuedAt) -> Duration {
        self.0 - *issued_at.as_ref()
    }
}
