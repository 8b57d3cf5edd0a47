mod action;
mod reducer;
mod state;

pub use action::ContactsAction;
pub use reducer::{ContactsFeature, ContactsReducer, ADD_CONTACT_ID};
pub use state::ContactsState;
