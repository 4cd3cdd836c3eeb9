use error_stack::{Report, ResultExt};
use rust_decimal::Decimal;
use vodca::{AsRefln, Fromln};

use crate::entity::{IssuedAt, RentAmount, RentPerDay, ReturnedAt};
use crate::KernelError;

const NANOS_PER_DAY: i128 = 86_400 * 1_000_000_000;

/// Number of days billed for a loan: every started 24-hour period counts
/// as a whole day, and a zero-length loan bills nothing.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Fromln, AsRefln)]
pub struct RentalDays(i64);

impl RentalDays {
    pub fn between(
        issued_at: &IssuedAt,
        returned_at: &ReturnedAt,
    ) -> error_stack::Result<Self, KernelError> {
        let nanos = returned_at.elapsed_since(issued_at).whole_nanoseconds();
        if nanos < 0 {
            return Err(Report::new(KernelError::InvalidArgument).attach_printable(
                "Return date must not be earlier than the issue date",
            ));
        }
        let days = (nanos + NANOS_PER_DAY - 1) / NANOS_PER_DAY;
        let days = i64::try_from(days)
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("Rental period too long: {days} days"))?;
        Ok(Self(days))
    }

    pub fn charge(&self, rate: &RentPerDay) -> error_stack::Result<RentAmount, KernelError> {
        Decimal::from(self.0)
            .checked_mul(*rate.as_ref())
            .map(RentAmount::new)
            .ok_or_else(|| {
                Report::new(KernelError::InvalidArgument).attach_printable(format!(
                    "Rent for {} days at {} per day is too large",
                    self.0,
                    rate.as_ref()
                ))
            })
    }
}
