use error_stack::Report;
use rust_decimal::Decimal;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct RentPerDay(Decimal);

impl RentPerDay {
    pub fn new(rate: impl Into<Decimal>) -> error_stack::Result<Self, KernelError> {
        let rate = rate.into();
        if rate < Decimal::ZERO {
            return Err(Report::new(KernelError::InvalidArgument)
                .attach_printable(format!("Rent per day must not be negative: {rate}")));
        }
        Ok(Self(rate))
    }
}
