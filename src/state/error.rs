use super::event::ProviderEvent;
use super::model::ProviderState;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("cannot apply {event:?} to a provider that is {from:?}")]
    InvalidStateTransition {
        from: ProviderState,
        event: ProviderEvent,
    },
}
