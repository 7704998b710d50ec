pub mod accounts;

pub use accounts::{AccountPatch, AccountSearchFilter, ProfileUpdate, RegisterAccount};
