pub mod executor;

pub use executor::{DbError, QueryExecutor, QueryResult};
