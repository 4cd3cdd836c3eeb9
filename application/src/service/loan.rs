use std::collections::HashMap;

use error_stack::Report;
use rust_decimal::Decimal;

use kernel::interface::database::DatabaseConnection;
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnLoanQuery, DependOnUserQuery, LoanQuery, UserQuery,
};
use kernel::prelude::entity::{BookId, BookName, IssuePeriod, UserId, UserName};
use kernel::KernelError;

use crate::transfer::{
    BookRentDto, BookStatusDto, GetBookRentDto, GetBookStatusDto, GetLoansInPeriodDto,
    GetUserBooksDto, HolderDto, LoanPartiesDto,
};

fn book_not_found() -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable("Book not found")
}

fn dangling(kind: &str, id: impl std::fmt::Display) -> Report<KernelError> {
    Report::new(KernelError::Internal).attach_printable(format!("Loan refers to missing {kind} {id}"))
}

async fn book_name_of<Q: BookQuery>(
    query: &Q,
    con: &mut Q::Transaction,
    cache: &mut HashMap<BookId, BookName>,
    id: &BookId,
) -> error_stack::Result<BookName, KernelError> {
    if let Some(name) = cache.get(id).cloned() {
        return Ok(name);
    }
    let book = query
        .find_by_id(con, id)
        .await?
        .ok_or_else(|| dangling("book", id.as_ref()))?;
    cache.insert(id.clone(), book.name().clone());
    Ok(book.name().clone())
}

async fn user_name_of<Q: UserQuery>(
    query: &Q,
    con: &mut Q::Transaction,
    cache: &mut HashMap<UserId, UserName>,
    id: &UserId,
) -> error_stack::Result<UserName, KernelError> {
    if let Some(name) = cache.get(id).cloned() {
        return Ok(name);
    }
    let user = query
        .find_by_id(con, id)
        .await?
        .ok_or_else(|| dangling("user", id.as_ref()))?;
    cache.insert(id.clone(), user.name().clone());
    Ok(user.name().clone())
}

#[async_trait::async_trait]
pub trait GetLoanService:
    'static + Sync + Send + DependOnUserQuery + DependOnBookQuery + DependOnLoanQuery
{
    async fn get_book_status(
        &self,
        dto: GetBookStatusDto,
    ) -> error_stack::Result<BookStatusDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book = self
            .book_query()
            .find_first_containing(&mut connection, &dto.book_name)
            .await?
            .ok_or_else(book_not_found)?;
        let loans = self
            .loan_query()
            .find_by_book_id(&mut connection, book.id())
            .await?;

        let current_holder = match loans.iter().find(|loan| loan.is_open()) {
            Some(loan) => {
                let holder = self
                    .user_query()
                    .find_by_id(&mut connection, loan.user_id())
                    .await?
                    .ok_or_else(|| dangling("user", loan.user_id().as_ref()))?;
                Some(HolderDto::from(holder))
            }
            None => None,
        };

        Ok(BookStatusDto {
            total_issued_count: loans.len(),
            current_holder,
        })
    }

    async fn get_book_rent(
        &self,
        dto: GetBookRentDto,
    ) -> error_stack::Result<BookRentDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book = self
            .book_query()
            .find_first_containing(&mut connection, &dto.book_name)
            .await?
            .ok_or_else(book_not_found)?;
        let total_rent = self
            .loan_query()
            .find_by_book_id(&mut connection, book.id())
            .await?
            .iter()
            .filter_map(|loan| *loan.rent_amount())
            .try_fold(Decimal::ZERO, |total, rent| {
                total.checked_add(Decimal::from(rent))
            })
            .ok_or_else(|| {
                Report::new(KernelError::InvalidArgument).attach_printable(format!(
                    "Total rent of {} is too large",
                    book.name().as_ref()
                ))
            })?;

        Ok(BookRentDto {
            book_name: book.name().clone().into(),
            total_rent,
        })
    }

    async fn get_user_books(
        &self,
        dto: GetUserBooksDto,
    ) -> error_stack::Result<Vec<String>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user = self
            .user_query()
            .find_by_name(&mut connection, &UserName::new(dto.user_name))
            .await?
            .ok_or_else(|| Report::new(KernelError::NotFound).attach_printable("User not found"))?;
        let loans = self
            .loan_query()
            .find_by_user_id(&mut connection, user.id())
            .await?;

        let mut names = HashMap::new();
        let mut result = Vec::with_capacity(loans.len());
        for loan in &loans {
            let name = book_name_of(
                self.book_query(),
                &mut connection,
                &mut names,
                loan.book_id(),
            )
            .await?;
            result.push(name.into());
        }
        Ok(result)
    }

    async fn get_loans_in_period(
        &self,
        dto: GetLoansInPeriodDto,
    ) -> error_stack::Result<Vec<LoanPartiesDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let period = IssuePeriod::new(dto.start, dto.end);
        let loans = self
            .loan_query()
            .find_issued_within(&mut connection, &period)
            .await?;

        let mut book_names = HashMap::new();
        let mut user_names = HashMap::new();
        let mut result = Vec::with_capacity(loans.len());
        for loan in &loans {
            let book_name = book_name_of(
                self.book_query(),
                &mut connection,
                &mut book_names,
                loan.book_id(),
            )
            .await?;
            let user_name = user_name_of(
                self.user_query(),
                &mut connection,
                &mut user_names,
                loan.user_id(),
            )
            .await?;
            result.push(LoanPartiesDto {
                book_name: book_name.into(),
                user_name: user_name.into(),
            });
        }
        Ok(result)
    }
}

impl<T> GetLoanService for T where T: DependOnUserQuery + DependOnBookQuery + DependOnLoanQuery {}
