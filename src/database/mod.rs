//! Connection pool, unit-of-work scope and seed data.

pub mod pool;
pub mod seed;
pub mod unit_of_work;

pub use pool::Database;
pub use unit_of_work::ScopedFuture;
