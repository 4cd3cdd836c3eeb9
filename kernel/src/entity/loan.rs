mod id;
mod issued_at;
mod period;
mod rent_amount;
mod rental_days;
mod returned_at;

pub use self::{id::*, issued_at::*, period::*, rent_amount::*, rental_days::*, returned_at::*};
use destructure::Destructure;
use error_stack::Report;
use vodca::References;

use crate::entity::{BookId, RentPerDay, UserId};
use crate::KernelError;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Loan {
    id: LoanId,
    user_id: UserId,
    book_id: BookId,
    issued_at: IssuedAt,
    returned_at: Option<ReturnedAt>,
    rent_amount: Option<RentAmount>,
}

impl Loan {
    pub fn new(
        id: LoanId,
        user_id: UserId,
        book_id: BookId,
        issued_at: IssuedAt,
        returned_at: Option<ReturnedAt>,
        rent_amount: Option<RentAmount>,
    ) -> Self {
        Self {
            id,
            user_id,
            book_id,
            issued_at,
            returned_at,
            rent_amount,
        }
    }

    pub fn issue(id: LoanId, user_id: UserId, book_id: BookId, issued_at: IssuedAt) -> Self {
        Self::new(id, user_id, book_id, issued_at, None, None)
    }

    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }

    pub fn close(
        self,
        returned_at: ReturnedAt,
        rate: &RentPerDay,
    ) -> error_stack::Result<Self, KernelError> {
        if !self.is_open() {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable(format!("Loan {} is already returned", self.id.as_ref())));
        }
        let days = RentalDays::between(&self.issued_at, &returned_at)?;
        let rent = days.charge(rate)?;
        Ok(self.reconstruct(|loan| {
            loan.returned_at = Some(returned_at);
            loan.rent_amount = Some(rent);
        }))
    }
}
