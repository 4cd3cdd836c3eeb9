use crate::KernelError;

#[async_trait::async_trait]
pub trait DatabaseConnection: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError>;
}

pub trait DependOnDatabaseConnection: 'static + Sync + Send {
    type DatabaseConnection: DatabaseConnection;
    fn database_connection(&self) -> &Self::DatabaseConnection;
}

impl<T> DependOnDatabaseConnection for T
where
    T: DatabaseConnection,
{
    type DatabaseConnection = T;
    fn database_connection(&self) -> &Self::DatabaseConnection {
        self
    }
}

#[async_trait::async_trait]
pub trait Transaction: 'static + Sync + Send {
    async fn commit(self) -> error_stack::Result<(), KernelError>;
    async fn roll_back(self) -> error_stack::Result<(), KernelError>;

    // commits after a successful write, otherwise rolls back and keeps the write's error
    async fn settle<T: Send>(
        self,
        written: error_stack::Result<T, KernelError>,
    ) -> error_stack::Result<T, KernelError>
    where
        Self: Sized,
    {
        match written {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(mut report) => {
                if let Err(failure) = self.roll_back().await {
                    report.extend_one(failure);
                }
                Err(report)
            }
        }
    }
}
