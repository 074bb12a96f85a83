//! Core types for socialcal.
//!
//! This crate provides everything the front-ends share:
//! - `Birthday` records and the in-memory `BirthdayStore` with its queries
//! - `next_birthday` for the "next celebration" calculation
//! - `PersistenceProvider` and the providers that load/sync records
//! - `Session`, which keeps a store in step with a provider

pub mod birthday;
pub mod config;
pub mod entry;
pub mod error;
pub mod month;
pub mod next_birthday;
pub mod provider;
pub mod session;
pub mod store;

pub use birthday::{Birthday, NewBirthday};
pub use error::{SocialCalError, SocialCalResult};
pub use next_birthday::{NextBirthday, next_birthday, upcoming};
pub use session::Session;
pub use store::BirthdayStore;
