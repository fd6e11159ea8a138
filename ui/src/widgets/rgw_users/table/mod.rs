//! Users table, driven by the shared column layout.

mod cells;
pub mod columns;
pub mod header;
pub mod row;
