pub mod account;
pub mod principal;

pub use account::{Account, Role};
pub use principal::{Actor, AuthPrincipal};
