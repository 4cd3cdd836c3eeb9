use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnLoanQuery, DependOnUserQuery, LoanQuery, UserQuery,
};
use kernel::interface::update::{DependOnLoanModifier, LoanModifier};
use kernel::prelude::entity::{BookName, IssuedAt, Loan, LoanId, ReturnedAt, UserName};
use kernel::KernelError;

use crate::transfer::{IssueBookDto, LoanDto, ReturnBookDto};

fn member_or_book_not_found() -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable("User or book not found")
}

#[async_trait::async_trait]
pub trait LendingService:
    'static
    + Sync
    + Send
    + DependOnUserQuery
    + DependOnBookQuery
    + DependOnLoanQuery
    + DependOnLoanModifier
{
    async fn issue_book(&self, dto: IssueBookDto) -> error_stack::Result<LoanDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user = self
            .user_query()
            .find_by_name(&mut connection, &UserName::new(dto.user_name))
            .await?;
        let book = self
            .book_query()
            .find_by_name(&mut connection, &BookName::new(dto.book_name))
            .await?;
        let (user, book) = user.zip(book).ok_or_else(member_or_book_not_found)?;

        let open = self
            .loan_query()
            .find_open(&mut connection, user.id(), book.id())
            .await?;
        if open.is_some() {
            return Err(Report::new(KernelError::Conflict)
                .attach_printable("Book is already issued to this user"));
        }

        let loan = Loan::issue(
            LoanId::new(Uuid::new_v4()),
            user.id().clone(),
            book.id().clone(),
            IssuedAt::new(dto.issued_at),
        );
        let created = self.loan_modifier().create(&mut connection, &loan).await;
        connection.settle(created).await?;

        tracing::info!(
            loan_id = %loan.id().as_ref(),
            user = %user.name().as_ref(),
            book = %book.name().as_ref(),
            "book issued"
        );
        Ok(LoanDto::from(loan))
    }

    async fn return_book(&self, dto: ReturnBookDto) -> error_stack::Result<LoanDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user = self
            .user_query()
            .find_by_name(&mut connection, &UserName::new(dto.user_name))
            .await?;
        let book = self
            .book_query()
            .find_by_name(&mut connection, &BookName::new(dto.book_name))
            .await?;
        let (user, book) = user.zip(book).ok_or_else(member_or_book_not_found)?;

        let loan = self
            .loan_query()
            .find_open(&mut connection, user.id(), book.id())
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable("Transaction not found")
            })?;

        let loan = loan.close(ReturnedAt::new(dto.returned_at), book.rent_per_day())?;
        let closed = self.loan_modifier().close(&mut connection, &loan).await;
        connection.settle(closed).await?;

        tracing::info!(
            loan_id = %loan.id().as_ref(),
            user = %user.name().as_ref(),
            book = %book.name().as_ref(),
            rent = ?(*loan.rent_amount()).map(rust_decimal::Decimal::from),
            "book returned"
        );
        Ok(LoanDto::from(loan))
    }
}

impl<T> LendingService for T where
    T: DependOnUserQuery + DependOnBookQuery + DependOnLoanQuery + DependOnLoanModifier
{
}

#[cfg(test)]
mod test {
    use rust_decimal_macros::dec;
    use time::macros::datetime;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use kernel::prelude::entity::{
        Book, BookCategory, BookId, BookName, RentPerDay, User, UserEmail, UserId, UserName,
        UserPassword,
    };
    use kernel::KernelError;

    use crate::memory::MemoryDatabase;
    use crate::service::LendingService;
    use crate::transfer::{IssueBookDto, ReturnBookDto};

    fn library() -> MemoryDatabase {
        let users = ["alice", "bob"]
            .into_iter()
            .map(|name| {
                User::new(
                    UserId::new(Uuid::new_v4()),
                    UserName::new(name),
                    UserEmail::new(format!("{name}@example.com")),
                    UserPassword::new("pw"),
                )
            })
            .collect();
        let books = vec![
            Book::new(
                BookId::new(Uuid::new_v4()),
                BookName::new("Dune"),
                BookCategory::new("SciFi"),
                RentPerDay::new(dec!(2)).unwrap(),
            ),
            Book::new(
                BookId::new(Uuid::new_v4()),
                BookName::new("Emma"),
                BookCategory::new("Classic"),
                RentPerDay::new(dec!(1.5)).unwrap(),
            ),
        ];
        MemoryDatabase::new(users, books)
    }

    fn issue(user: &str, book: &str, at: OffsetDateTime) -> IssueBookDto {
        IssueBookDto {
            user_name: user.to_string(),
            book_name: book.to_string(),
            issued_at: at,
        }
    }

    fn give_back(user: &str, book: &str, at: OffsetDateTime) -> ReturnBookDto {
        ReturnBookDto {
            user_name: user.to_string(),
            book_name: book.to_string(),
            returned_at: at,
        }
    }

    #[tokio::test]
    async fn issue_creates_open_loan() -> error_stack::Result<(), KernelError> {
        let db = library();
        let loan = db
            .issue_book(issue("alice", "Dune", datetime!(2024-03-01 0:00 UTC)))
            .await?;
        assert_eq!(loan.issued_at, datetime!(2024-03-01 0:00 UTC));
        assert_eq!(loan.returned_at, None);
        assert_eq!(loan.rent_amount, None);
        assert_eq!(db.loans().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn issue_with_unknown_names_is_not_found() {
        let db = library();
        for (user, book) in [("nobody", "Dune"), ("alice", "Missing"), ("x", "y")] {
            let report = db
                .issue_book(issue(user, book, datetime!(2024-03-01 0:00 UTC)))
                .await
                .unwrap_err();
            assert_eq!(report.current_context(), &KernelError::NotFound);
        }
        assert!(db.loans().is_empty());
    }

    #[tokio::test]
    async fn issuing_twice_to_same_member_conflicts() -> error_stack::Result<(), KernelError> {
        let db = library();
        db.issue_book(issue("alice", "Dune", datetime!(2024-03-01 0:00 UTC)))
            .await?;
        let report = db
            .issue_book(issue("alice", "Dune", datetime!(2024-03-02 0:00 UTC)))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);

        // another member may still borrow the same title
        db.issue_book(issue("bob", "Dune", datetime!(2024-03-02 0:00 UTC)))
            .await?;
        assert_eq!(db.loans().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn return_bills_started_days() -> error_stack::Result<(), KernelError> {
        let db = library();
        db.issue_book(issue("alice", "Dune", datetime!(2024-03-01 0:00 UTC)))
            .await?;
        let loan = db
            .return_book(give_back("alice", "Dune", datetime!(2024-03-04 0:00 UTC)))
            .await?;
        assert_eq!(loan.returned_at, Some(datetime!(2024-03-04 0:00 UTC)));
        assert_eq!(loan.rent_amount, Some(dec!(6)));
        Ok(())
    }

    #[tokio::test]
    async fn return_after_25_hours_bills_two_days() -> error_stack::Result<(), KernelError> {
        let db = library();
        db.issue_book(issue("alice", "Emma", datetime!(2024-03-01 9:00 UTC)))
            .await?;
        let loan = db
            .return_book(give_back("alice", "Emma", datetime!(2024-03-02 10:00 UTC)))
            .await?;
        assert_eq!(loan.rent_amount, Some(dec!(3.0)));
        Ok(())
    }

    #[tokio::test]
    async fn same_day_return_is_free() -> error_stack::Result<(), KernelError> {
        let db = library();
        db.issue_book(issue("alice", "Dune", datetime!(2024-03-01 0:00 UTC)))
            .await?;
        let loan = db
            .return_book(give_back("alice", "Dune", datetime!(2024-03-01 0:00 UTC)))
            .await?;
        assert_eq!(loan.rent_amount, Some(dec!(0)));
        Ok(())
    }

    #[tokio::test]
    async fn return_without_open_loan_is_not_found() -> error_stack::Result<(), KernelError> {
        let db = library();
        let report = db
            .return_book(give_back("alice", "Dune", datetime!(2024-03-01 0:00 UTC)))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);

        db.issue_book(issue("alice", "Dune", datetime!(2024-03-01 0:00 UTC)))
            .await?;
        db.return_book(give_back("alice", "Dune", datetime!(2024-03-02 0:00 UTC)))
            .await?;
        let report = db
            .return_book(give_back("alice", "Dune", datetime!(2024-03-03 0:00 UTC)))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);

        // bob never borrowed it
        db.issue_book(issue("alice", "Dune", datetime!(2024-03-05 0:00 UTC)))
            .await?;
        let report = db
            .return_book(give_back("bob", "Dune", datetime!(2024-03-06 0:00 UTC)))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn return_with_unknown_names_is_not_found() {
        let db = library();
        let report = db
            .return_book(give_back("nobody", "Dune", datetime!(2024-03-01 0:00 UTC)))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
    }

    #[tokio::test]
    async fn return_before_issue_is_rejected() -> error_stack::Result<(), KernelError> {
        let db = library();
        db.issue_book(issue("alice", "Dune", datetime!(2024-03-05 0:00 UTC)))
            .await?;
        let report = db
            .return_book(give_back("alice", "Dune", datetime!(2024-03-01 0:00 UTC)))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidArgument);
        assert!(db.loans()[0].is_open());
        Ok(())
    }

    #[tokio::test]
    async fn return_with_unpayable_rent_keeps_loan_open() -> error_stack::Result<(), KernelError> {
        let db = MemoryDatabase::new(
            vec![User::new(
                UserId::new(Uuid::new_v4()),
                UserName::new("alice"),
                UserEmail::new("alice@example.com"),
                UserPassword::new("pw"),
            )],
            vec![Book::new(
                BookId::new(Uuid::new_v4()),
                BookName::new("Folio"),
                BookCategory::new("Rare"),
                RentPerDay::new(rust_decimal::Decimal::MAX).unwrap(),
            )],
        );
        db.issue_book(issue("alice", "Folio", datetime!(2024-03-01 0:00 UTC)))
            .await?;
        let report = db
            .return_book(give_back("alice", "Folio", datetime!(2024-03-03 0:00 UTC)))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidArgument);
        assert!(db.loans()[0].is_open());
        Ok(())
    }

    #[tokio::test]
    async fn reissue_after_return_is_allowed() -> error_stack::Result<(), KernelError> {
        let db = library();
        db.issue_book(issue("alice", "Dune", datetime!(2024-03-01 0:00 UTC)))
            .await?;
        db.return_book(give_back("alice", "Dune", datetime!(2024-03-02 0:00 UTC)))
            .await?;
        db.issue_book(issue("alice", "Dune", datetime!(2024-03-03 0:00 UTC)))
            .await?;
        assert_eq!(db.loans().len(), 2);
        Ok(())
    }
}
