pub mod admin;
pub mod depositor;
pub mod draw;
pub mod lender;
pub mod views;
