//! FX module - the USD rate table and the process-wide rate book.

mod rate_book;
mod rate_table;

pub use rate_book::RateBook;
pub use rate_table::{currency_code, RateTable};
