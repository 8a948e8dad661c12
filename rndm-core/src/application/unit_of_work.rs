use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::database::ports::{EntriesRepository, InteractionsRepository};
use crate::database::postgres::PostgresDatabase;
use crate::database::repositories::{
    PostgresEntriesRepository, PostgresInteractionsRepository,
};

/// Aggregates the repository ports used by application services.
///
/// Handlers depend on this composition-based façade rather than on concrete
/// repository types, so tests can substitute in-memory implementations.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub entries: Arc<dyn EntriesRepository>,
    pub interactions: Arc<dyn InteractionsRepository>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field("entries", &type_name_of_val(self.entries.as_ref()))
            .field(
                "interactions",
                &type_name_of_val(self.interactions.as_ref()),
            )
            .finish()
    }
}

impl AppUnitOfWork {
    /// Wire every port to its Postgres implementation over the database's
    /// shared pool.
    pub fn from_postgres(db: &PostgresDatabase) -> Self {
        Self {
            entries: Arc::new(PostgresEntriesRepository::new(
                db.pool().clone(),
            )),
            interactions: Arc::new(PostgresInteractionsRepository::new(
                db.pool().clone(),
            )),
        }
    }
}
