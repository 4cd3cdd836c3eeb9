use time::{Date, OffsetDateTime, UtcOffset};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct IssuedAt(OffsetDateTime);

impl IssuedAt {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }

    pub fn date(&self) -> Date {
        self.0.to_offset(UtcOffset::UTC).date()
    }
}
