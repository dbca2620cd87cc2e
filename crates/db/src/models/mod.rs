//! Row structs matching database tables.

pub mod qr_code;
