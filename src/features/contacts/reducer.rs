use crate::compose::{IfLet, PresentationAction, ReducerExt};
use crate::effect::Effect;
use crate::features::add_contact::{
    AddContactAction, AddContactReducer, AddContactState, Contact, Delegate,
};
use crate::features::contacts::action::ContactsAction;
use crate::features::contacts::state::ContactsState;
use crate::mvi::Reducer;

/// Namespace for effects of the presented add-contact flow.
pub const ADD_CONTACT_ID: &str = "add_contact";

/// Contacts list with the add-contact flow embedded.
pub type ContactsFeature = IfLet<ContactsReducer, AddContactReducer>;

/// Parent-only logic of the contacts list.
pub struct ContactsReducer;

impl ContactsReducer {
    /// The full feature: this reducer plus the embedded add-contact flow.
    pub fn feature() -> ContactsFeature {
        ContactsReducer.if_let(
            AddContactReducer,
            ADD_CONTACT_ID,
            add_contact_slot,
            add_contact_action,
            ContactsAction::AddContact,
        )
    }
}

fn add_contact_slot(state: &mut ContactsState) -> &mut Option<AddContactState> {
    &mut state.add_contact
}

fn add_contact_action(action: &ContactsAction) -> Option<&PresentationAction<AddContactAction>> {
    match action {
        ContactsAction::AddContact(presentation) => Some(presentation),
        ContactsAction::AddButtonTapped => None,
    }
}

impl Reducer for ContactsReducer {
    type State = ContactsState;
    type Action = ContactsAction;

    fn reduce(
        &self,
        mut state: ContactsState,
        action: ContactsAction,
    ) -> (ContactsState, Effect<ContactsAction>) {
        match action {
            ContactsAction::AddButtonTapped => {
                state.add_contact = Some(AddContactState {
                    contact: Contact::new(""),
                });
            }
            ContactsAction::AddContact(PresentationAction::Presented(
                AddContactAction::Delegate(Delegate::SaveContact(contact)),
            )) => {
                let id = contact.id;
                if !state.contacts.push(contact) {
                    tracing::warn!(contact = %id, "Contact already saved; ignored");
                }
            }
            ContactsAction::AddContact(_) => {}
        }
        (state, Effect::none())
    }
}
