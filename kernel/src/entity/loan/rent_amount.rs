use rust_decimal::Decimal;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct RentAmount(Decimal);

impl RentAmount {
    pub fn new(amount: impl Into<Decimal>) -> Self {
        Self(amount.into())
    }
}
