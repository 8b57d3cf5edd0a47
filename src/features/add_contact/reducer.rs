use crate::effect::Effect;
use crate::features::add_contact::action::{AddContactAction, Delegate};
use crate::features::add_contact::state::AddContactState;
use crate::mvi::Reducer;

/// Modal flow for entering a new contact.
///
/// Never touches the contact list itself: saving hands the contact to the
/// presenter through a delegate action and then asks to be dismissed.
pub struct AddContactReducer;

impl Reducer for AddContactReducer {
    type State = AddContactState;
    type Action = AddContactAction;

    fn reduce(
        &self,
        mut state: AddContactState,
        action: AddContactAction,
    ) -> (AddContactState, Effect<AddContactAction>) {
        match action {
            AddContactAction::CancelButtonTapped => (state, Effect::dismiss()),
            AddContactAction::SaveButtonTapped => {
                let contact = state.contact.clone();
                (
                    state,
                    Effect::merge([
                        Effect::send(AddContactAction::Delegate(Delegate::SaveContact(contact))),
                        Effect::dismiss(),
                    ]),
                )
            }
            AddContactAction::SetName(name) => {
                state.contact.name = name;
                (state, Effect::none())
            }
            AddContactAction::Delegate(_) => (state, Effect::none()),
        }
    }
}
