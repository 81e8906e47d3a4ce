//! Per-entity statement families.
//!
//! Every function here issues exactly one statement through [`crate::Db`].
//! Identifiers are caller-supplied and never checked for uniqueness before
//! insert; a duplicate key surfaces as the database's constraint error.

pub mod doctors;
pub mod employees;
pub mod medicines;
pub mod patients;
pub mod prescriptions;
