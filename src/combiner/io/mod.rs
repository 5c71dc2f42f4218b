//! CSV codec adapters: parsing raw bytes into records and serialising
//! combined tables back to CSV.

pub mod csv_read;
pub mod csv_write;
