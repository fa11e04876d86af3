use super::constants::keys;
use super::types::*;

/// What a submit in a given state asks the dialog to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Authenticate,
    Cancel,
    GoTo(DialogStateId),
    Ignore,
}

pub struct AuthStateMachine;

impl AuthStateMachine {
    /// Builds the three-state table. Without a cancel path neither `Login` nor
    /// `Finished` offers a cancel button.
    pub fn state_table(allow_cancel: bool) -> StateTable {
        let mut login_buttons = vec![ButtonSpec::new(keys::OK, ButtonValue::Confirm, 'o')];
        let mut finished_buttons = vec![ButtonSpec::new(keys::RETRY, ButtonValue::Retry, 'r')];
        if allow_cancel {
            login_buttons.push(ButtonSpec::new(keys::CANCEL, ButtonValue::Cancel, 'c'));
            finished_buttons.push(ButtonSpec::new(keys::CANCEL, ButtonValue::Cancel, 'c'));
        }

        StateTable::new(vec![
            DialogStateSpec {
                id: DialogStateId::Login,
                title_key: keys::LOGIN_TITLE,
                body: StateBody::CredentialForm,
                buttons: login_buttons,
                default_button: Some(0),
                focus: Some(FormField::Identity),
            },
            DialogStateSpec {
                id: DialogStateId::Connecting,
                title_key: keys::CONNECTING_TITLE,
                body: StateBody::StatusRegion,
                buttons: Vec::new(),
                default_button: None,
                focus: None,
            },
            DialogStateSpec {
                id: DialogStateId::Finished,
                title_key: keys::FINISHED_TITLE,
                body: StateBody::ErrorRegion,
                buttons: finished_buttons,
                default_button: Some(0),
                focus: None,
            },
        ])
    }

    pub fn on_submit(current: DialogStateId, value: ButtonValue) -> SubmitOutcome {
        match (current, value) {
            (DialogStateId::Login, ButtonValue::Confirm) => SubmitOutcome::Authenticate,
            (DialogStateId::Login, ButtonValue::Cancel)
            | (DialogStateId::Finished, ButtonValue::Cancel) => SubmitOutcome::Cancel,
            (DialogStateId::Finished, ButtonValue::Retry) => {
                SubmitOutcome::GoTo(DialogStateId::Login)
            }
            _ => SubmitOutcome::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(table: &StateTable, id: DialogStateId) -> Vec<ButtonValue> {
        table
            .get(id)
            .map(|s| s.buttons.iter().map(|b| b.value).collect())
            .unwrap_or_default()
    }

    #[test]
    fn table_without_cancel_offers_single_buttons() {
        let table = AuthStateMachine::state_table(false);
        assert_eq!(values(&table, DialogStateId::Login), vec![ButtonValue::Confirm]);
        assert_eq!(values(&table, DialogStateId::Finished), vec![ButtonValue::Retry]);
        assert!(values(&table, DialogStateId::Connecting).is_empty());
    }

    #[test]
    fn table_with_cancel_appends_cancel_second() {
        let table = AuthStateMachine::state_table(true);
        assert_eq!(
            values(&table, DialogStateId::Login),
            vec![ButtonValue::Confirm, ButtonValue::Cancel]
        );
        assert_eq!(
            values(&table, DialogStateId::Finished),
            vec![ButtonValue::Retry, ButtonValue::Cancel]
        );
    }

    #[test]
    fn login_is_initial_and_focuses_identity() {
        let table = AuthStateMachine::state_table(true);
        let initial = table.initial().expect("initial state");
        assert_eq!(initial.id, DialogStateId::Login);
        assert_eq!(initial.focus, Some(FormField::Identity));
        assert_eq!(initial.default_value(), Some(ButtonValue::Confirm));
    }

    #[test]
    fn connecting_ignores_every_value() {
        for value in [
            ButtonValue::Confirm,
            ButtonValue::Cancel,
            ButtonValue::Retry,
            ButtonValue::Dismiss,
        ] {
            assert_eq!(
                AuthStateMachine::on_submit(DialogStateId::Connecting, value),
                SubmitOutcome::Ignore
            );
        }
    }

    #[test]
    fn retry_only_applies_to_finished() {
        assert_eq!(
            AuthStateMachine::on_submit(DialogStateId::Finished, ButtonValue::Retry),
            SubmitOutcome::GoTo(DialogStateId::Login)
        );
        assert_eq!(
            AuthStateMachine::on_submit(DialogStateId::Login, ButtonValue::Retry),
            SubmitOutcome::Ignore
        );
    }
}
