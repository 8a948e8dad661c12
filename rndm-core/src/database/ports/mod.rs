pub mod entries;
pub mod interactions;

pub use entries::EntriesRepository;
pub use interactions::InteractionsRepository;
