pub mod entries;
pub mod interactions;

pub use entries::PostgresEntriesRepository;
pub use interactions::PostgresInteractionsRepository;
