mod action;
mod contact;
mod reducer;
mod state;

pub use action::{AddContactAction, Delegate};
pub use contact::Contact;
pub use reducer::AddContactReducer;
pub use state::AddContactState;
