mod common;
mod event;
mod user;

pub use common::*;
pub use event::*;
pub use user::*;
