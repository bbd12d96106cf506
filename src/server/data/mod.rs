//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models so the
//! service layer never depends on the storage shape of a row.

pub mod registration;

#[cfg(test)]
mod test;
