//! `usermgmt-users` — the user-management domain.
//!
//! The user entity and its value objects, the persistence boundary, and the
//! application service that wires them to an identifier issuer.

pub mod dto;
pub mod service;
pub mod store;
pub mod user;

pub use dto::{NewUser, UserDto, UserUpdate};
pub use service::UserService;
pub use store::{InMemoryUserStore, Page, Pagination, UserStore};
pub use user::{Email, PhoneNumber, User, UserId};
