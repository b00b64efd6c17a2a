use std::fmt;

use super::error::{StateError, StateResult};
use super::{ProviderEvent, ProviderState, StateTransition};

/// Tracks where a provider is in its mount sequence and how it got there.
#[derive(Debug, Default)]
pub struct Lifecycle {
    current: ProviderState,
    steps: Vec<StateTransition>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProviderState {
        self.current
    }

    pub fn steps(&self) -> &[StateTransition] {
        &self.steps
    }

    /// Hydration runs exactly once: Uninitialized, then Hydrating, then Ready.
    fn target(from: ProviderState, event: ProviderEvent) -> Option<ProviderState> {
        match (from, event) {
            (ProviderState::Uninitialized, ProviderEvent::BeginHydration) => {
                Some(ProviderState::Hydrating)
            }
            (ProviderState::Hydrating, ProviderEvent::FinishHydration) => {
                Some(ProviderState::Ready)
            }
            _ => None,
        }
    }

    pub fn advance(&mut self, event: ProviderEvent) -> StateResult<ProviderState> {
        let from = self.current;
        let Some(to) = Self::target(from, event) else {
            tracing::warn!(?from, ?event, "provider lifecycle event rejected");
            return Err(StateError::InvalidStateTransition { from, event });
        };

        self.steps.push(StateTransition::new(from, event, to));
        self.current = to;
        Ok(to)
    }
}

/// Renders the path taken so far, e.g. `Uninitialized -> Hydrating -> Ready`.
impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.steps.first() else {
            return write!(f, "{:?}", self.current);
        };
        write!(f, "{:?}", first.from)?;
        for step in &self.steps {
            write!(f, " -> {:?}", step.to)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hydration_walks_to_ready_and_records_each_step() {
        let mut lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.to_string(), "Uninitialized");

        assert_eq!(
            lifecycle.advance(ProviderEvent::BeginHydration).unwrap(),
            ProviderState::Hydrating
        );
        assert_eq!(
            lifecycle.advance(ProviderEvent::FinishHydration).unwrap(),
            ProviderState::Ready
        );

        assert!(lifecycle.state().is_ready());
        assert_eq!(lifecycle.steps().len(), 2);
        assert_eq!(
            lifecycle.steps()[1],
            StateTransition::new(
                ProviderState::Hydrating,
                ProviderEvent::FinishHydration,
                ProviderState::Ready
            )
        );
        assert_eq!(lifecycle.to_string(), "Uninitialized -> Hydrating -> Ready");
    }

    #[test]
    fn out_of_order_events_leave_state_untouched() {
        let mut lifecycle = Lifecycle::new();
        assert!(matches!(
            lifecycle.advance(ProviderEvent::FinishHydration),
            Err(StateError::InvalidStateTransition {
                from: ProviderState::Uninitialized,
                event: ProviderEvent::FinishHydration,
            })
        ));
        assert_eq!(lifecycle.state(), ProviderState::Uninitialized);
        assert!(lifecycle.steps().is_empty());

        lifecycle.advance(ProviderEvent::BeginHydration).unwrap();
        lifecycle.advance(ProviderEvent::FinishHydration).unwrap();
        assert!(lifecycle.advance(ProviderEvent::BeginHydration).is_err());
        assert_eq!(lifecycle.steps().len(), 2);
    }
}
