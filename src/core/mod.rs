//! Core business logic - framework-agnostic retention computations and reference data.
//!
//! [`nit`], [`money`] and [`retention`] are pure and perform no I/O. The remaining modules
//! maintain the reference data those computations consume.

pub mod account;
pub mod catalog;
pub mod company;
pub mod concept;
pub mod money;
pub mod nit;
pub mod retention;
pub mod supplier;
pub mod tax_regime;
