pub mod checkout;
pub mod status;
pub mod webhook_status;
