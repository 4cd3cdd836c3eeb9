use error_stack::Report;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::LoanQuery;
use kernel::interface::update::LoanModifier;
use kernel::prelude::entity::{
    BookId, IssuePeriod, IssuedAt, Loan, LoanId, RentAmount, ReturnedAt, UserId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresConnection;
use crate::error::ConvertError;

pub struct PostgresLoanRepository;

#[async_trait::async_trait]
impl LoanQuery for PostgresLoanRepository {
    type Transaction = PostgresConnection;

    async fn find_open(
        &self,
        con: &mut PostgresConnection,
        user_id: &UserId,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        PgLoanInternal::find_open(con, user_id, book_id).await
    }

    async fn find_by_book_id(
        &self,
        con: &mut PostgresConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        PgLoanInternal::find_by_book_id(con, book_id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        PgLoanInternal::find_by_user_id(con, user_id).await
    }

    async fn find_issued_within(
        &self,
        con: &mut PostgresConnection,
        period: &IssuePeriod,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        PgLoanInternal::find_issued_within(con, period).await
    }
}

#[async_trait::async_trait]
impl LoanModifier for PostgresLoanRepository {
    type Transaction = PostgresConnection;

    async fn create(
        &self,
        con: &mut PostgresConnection,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::create(con, loan).await
    }

    async fn close(
        &self,
        con: &mut PostgresConnection,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::close(con, loan).await
    }
}

#[derive(sqlx::FromRow)]
struct LoanRow {
    id: Uuid,
    user_id: Uuid,
    book_id: Uuid,
    issued_at: OffsetDateTime,
    returned_at: Option<OffsetDateTime>,
    rent_amount: Option<Decimal>,
}

impl From<LoanRow> for Loan {
    fn from(row: LoanRow) -> Self {
        Loan::new(
            LoanId::new(row.id),
            UserId::new(row.user_id),
            BookId::new(row.book_id),
            IssuedAt::new(row.issued_at),
            row.returned_at.map(ReturnedAt::new),
            row.rent_amount.map(RentAmount::new),
        )
    }
}

pub(in crate::database) struct PgLoanInternal;

impl PgLoanInternal {
    async fn find_open(
        con: &mut PgConnection,
        user_id: &UserId,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        let row = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, book_id, issued_at, returned_at, rent_amount
            FROM loans
            WHERE user_id = $1 AND book_id = $2 AND returned_at IS NULL
            "#,
        )
        .bind(user_id.as_ref())
        .bind(book_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Loan::from))
    }

    async fn find_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, book_id, issued_at, returned_at, rent_amount
            FROM loans
            WHERE book_id = $1
            ORDER BY issued_at, id
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Loan::from).collect())
    }

    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, book_id, issued_at, returned_at, rent_amount
            FROM loans
            WHERE user_id = $1
            ORDER BY issued_at, id
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Loan::from).collect())
    }

    async fn find_issued_within(
        con: &mut PgConnection,
        period: &IssuePeriod,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, book_id, issued_at, returned_at, rent_amount
            FROM loans
            WHERE (issued_at AT TIME ZONE 'UTC')::date BETWEEN $1 AND $2
            ORDER BY issued_at, id
            "#,
        )
        .bind(period.start())
        .bind(period.end())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Loan::from).collect())
    }

    async fn create(con: &mut PgConnection, loan: &Loan) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO loans (id, user_id, book_id, issued_at, returned_at, rent_amount)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(loan.id().as_ref())
        .bind(loan.user_id().as_ref())
        .bind(loan.book_id().as_ref())
        .bind(loan.issued_at().as_ref())
        .bind((*loan.returned_at()).map(OffsetDateTime::from))
        .bind((*loan.rent_amount()).map(Decimal::from))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn close(con: &mut PgConnection, loan: &Loan) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        let result = sqlx::query(
            r#"
            UPDATE loans
            SET returned_at = $2, rent_amount = $3
            WHERE id = $1 AND returned_at IS NULL
            "#,
        )
        .bind(loan.id().as_ref())
        .bind((*loan.returned_at()).map(OffsetDateTime::from))
        .bind((*loan.rent_amount()).map(Decimal::from))
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::Conflict).attach_printable(format!(
                "Loan {} is no longer open",
                loan.id().as_ref()
            )));
        }
        Ok(())
    }
}
