//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod qr_code_repo;

pub use qr_code_repo::QrCodeRepo;
