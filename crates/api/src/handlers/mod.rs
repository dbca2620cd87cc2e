pub mod qr_code;
pub mod scan;
