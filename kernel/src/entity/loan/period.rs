use time::Date;
use vodca::References;

use crate::entity::IssuedAt;

#[derive(Debug, Clone, Copy, Eq, PartialEq, References)]
pub struct IssuePeriod {
    start: Date,
    end: Date,
}

impl IssuePeriod {
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, issued_at: &IssuedAt) -> bool {
        let date = issued_at.date();
        self.start <= date && date <= self.end
    }
}
