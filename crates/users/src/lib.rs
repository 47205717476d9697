//! User directory for the dashboard's users screen.
//!
//! Users here are plain records (name, email, free-form role, status); the
//! dashboard performs no authentication or authorization.

pub mod user;

pub use user::{
    AddUser, RemoveUser, UpdateUser, User, UserAdded, UserCommand, UserDirectory, UserEvent,
    UserForm, UserRemoved, UserStatus, UserUpdated,
};
