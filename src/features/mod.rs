//! Features built on the store.
//!
//! - `counter`: count with a repeating timer and a number-fact lookup
//! - `contacts`: contact list with a modal add-contact flow
//! - `add_contact`: the add-contact flow itself

pub mod add_contact;
pub mod contacts;
pub mod counter;
