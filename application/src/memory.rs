use std::sync::{Arc, Mutex, MutexGuard};

use error_stack::Report;
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    BookQuery, DependOnBookQuery, DependOnLoanQuery, DependOnUserQuery, LoanQuery, UserQuery,
};
use kernel::interface::update::{
    BookModifier, DependOnBookModifier, DependOnLoanModifier, DependOnUserModifier, LoanModifier,
    UserModifier,
};
use kernel::prelude::entity::{
    contains_ignore_case, Book, BookFilter, BookId, BookName, IssuePeriod, Loan, User, UserId,
    UserName,
};
use kernel::KernelError;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    books: Vec<Book>,
    loans: Vec<Loan>,
}

#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDatabase {
    pub fn new(users: Vec<User>, books: Vec<Book>) -> Self {
        let tables = Tables {
            users,
            books,
            loans: Vec::new(),
        };
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }

    pub fn insert_loan(&self, loan: Loan) {
        self.tables.lock().unwrap().loans.push(loan);
    }

    pub fn loans(&self) -> Vec<Loan> {
        self.tables.lock().unwrap().loans.clone()
    }
}

pub struct MemoryTransaction {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryTransaction {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl Transaction for MemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for MemoryDatabase {
    type Transaction = MemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        Ok(MemoryTransaction {
            tables: Arc::clone(&self.tables),
        })
    }
}

pub struct MemoryRepository;

fn sorted_by_name(mut books: Vec<Book>) -> Vec<Book> {
    books.sort_by(|a, b| {
        (a.name().as_ref(), a.id().as_ref()).cmp(&(b.name().as_ref(), b.id().as_ref()))
    });
    books
}

fn sorted_by_issue(mut loans: Vec<Loan>) -> Vec<Loan> {
    loans.sort_by_key(|loan| *loan.issued_at().as_ref());
    loans
}

#[async_trait::async_trait]
impl BookQuery for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(sorted_by_name(con.tables().books.clone()))
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.tables().books.iter().find(|b| b.id() == id).cloned())
    }

    async fn find_by_name(
        &self,
        con: &mut MemoryTransaction,
        name: &BookName,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let books = sorted_by_name(con.tables().books.clone());
        Ok(books.into_iter().find(|b| b.name() == name))
    }

    async fn find_first_containing(
        &self,
        con: &mut MemoryTransaction,
        term: &str,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let books = sorted_by_name(con.tables().books.clone());
        Ok(books
            .into_iter()
            .find(|b| contains_ignore_case(b.name().as_ref(), term)))
    }

    async fn find_by_filter(
        &self,
        con: &mut MemoryTransaction,
        filter: &BookFilter,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        let books = sorted_by_name(con.tables().books.clone());
        Ok(books.into_iter().filter(|b| filter.matches(b)).collect())
    }
}

#[async_trait::async_trait]
impl BookModifier for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.tables().books.push(book.clone());
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserQuery for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn find_all(
        &self,
        con: &mut MemoryTransaction,
    ) -> error_stack::Result<Vec<User>, KernelError> {
        let mut users = con.tables().users.clone();
        users.sort_by(|a, b| a.name().as_ref().cmp(b.name().as_ref()));
        Ok(users)
    }

    async fn find_by_id(
        &self,
        con: &mut MemoryTransaction,
        id: &UserId,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.tables().users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_name(
        &self,
        con: &mut MemoryTransaction,
        name: &UserName,
    ) -> error_stack::Result<Option<User>, KernelError> {
        Ok(con.tables().users.iter().find(|u| u.name() == name).cloned())
    }
}

#[async_trait::async_trait]
impl UserModifier for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        user: &User,
    ) -> error_stack::Result<(), KernelError> {
        let mut tables = con.tables();
        if tables.users.iter().any(|u| u.name() == user.name()) {
            return Err(Report::new(KernelError::Conflict).attach_printable("duplicate user name"));
        }
        tables.users.push(user.clone());
        Ok(())
    }
}

#[async_trait::async_trait]
impl LoanQuery for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn find_open(
        &self,
        con: &mut MemoryTransaction,
        user_id: &UserId,
        book_id: &BookId,
    ) -> error_stack::Result<Option<Loan>, KernelError> {
        Ok(con
            .tables()
            .loans
            .iter()
            .find(|l| l.is_open() && l.user_id() == user_id && l.book_id() == book_id)
            .cloned())
    }

    async fn find_by_book_id(
        &self,
        con: &mut MemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let loans = con.tables().loans.clone();
        Ok(sorted_by_issue(
            loans.into_iter().filter(|l| l.book_id() == book_id).collect(),
        ))
    }

    async fn find_by_user_id(
        &self,
        con: &mut MemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let loans = con.tables().loans.clone();
        Ok(sorted_by_issue(
            loans.into_iter().filter(|l| l.user_id() == user_id).collect(),
        ))
    }

    async fn find_issued_within(
        &self,
        con: &mut MemoryTransaction,
        period: &IssuePeriod,
    ) -> error_stack::Result<Vec<Loan>, KernelError> {
        let loans = con.tables().loans.clone();
        Ok(sorted_by_issue(
            loans
                .into_iter()
                .filter(|l| period.contains(l.issued_at()))
                .collect(),
        ))
    }
}

#[async_trait::async_trait]
impl LoanModifier for MemoryRepository {
    type Transaction = MemoryTransaction;

    async fn create(
        &self,
        con: &mut MemoryTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        let mut tables = con.tables();
        let duplicated = tables.loans.iter().any(|l| {
            l.is_open() && l.user_id() == loan.user_id() && l.book_id() == loan.book_id()
        });
        if duplicated {
            return Err(Report::new(KernelError::Conflict).attach_printable("duplicate open loan"));
        }
        tables.loans.push(loan.clone());
        Ok(())
    }

    async fn close(
        &self,
        con: &mut MemoryTransaction,
        loan: &Loan,
    ) -> error_stack::Result<(), KernelError> {
        let mut tables = con.tables();
        let stored = tables
            .loans
            .iter_mut()
            .find(|l| l.id() == loan.id() && l.is_open())
            .ok_or_else(|| {
                Report::new(KernelError::Conflict).attach_printable("loan is not open")
            })?;
        *stored = loan.clone();
        Ok(())
    }
}

impl DependOnBookQuery for MemoryDatabase {
    type BookQuery = MemoryRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &MemoryRepository
    }
}

impl DependOnBookModifier for MemoryDatabase {
    type BookModifier = MemoryRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &MemoryRepository
    }
}

impl DependOnUserQuery for MemoryDatabase {
    type UserQuery = MemoryRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &MemoryRepository
    }
}

impl DependOnUserModifier for MemoryDatabase {
    type UserModifier = MemoryRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &MemoryRepository
    }
}

impl DependOnLoanQuery for MemoryDatabase {
    type LoanQuery = MemoryRepository;
    fn loan_query(&self) -> &Self::LoanQuery {
        &MemoryRepository
    }
}

impl DependOnLoanModifier for MemoryDatabase {
    type LoanModifier = MemoryRepository;
    fn loan_modifier(&self) -> &Self::LoanModifier {
        &MemoryRepository
    }
}
