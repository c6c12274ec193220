//! API endpoint modules.

mod events;
mod users;

pub use events::EventsApi;
pub use users::UsersApi;
