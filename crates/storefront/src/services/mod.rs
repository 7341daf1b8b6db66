//! Shopper-facing operations over the shared [`gimco_core::Shop`].

pub mod catalog;
pub mod checkout;
pub mod mpesa;
pub mod profile;
pub mod stylist;
pub mod tracking;
