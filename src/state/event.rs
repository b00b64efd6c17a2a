use super::model::ProviderState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderEvent {
    BeginHydration,
    FinishHydration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: ProviderState,
    pub event: ProviderEvent,
    pub to: ProviderState,
}

impl StateTransition {
    pub const fn new(from: ProviderState, event: ProviderEvent, to: ProviderState) -> Self {
        Self { from, event, to }
    }
}
