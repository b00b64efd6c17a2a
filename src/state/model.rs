/// Provider lifecycle: created, reading persisted state, then live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderState {
    #[default]
    Uninitialized,
    Hydrating,
    Ready,
}

impl ProviderState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}
