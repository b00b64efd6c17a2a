pub mod error;
pub mod event;
pub mod lifecycle;
pub mod model;

pub use error::{StateError, StateResult};
pub use event::{ProviderEvent, StateTransition};
pub use lifecycle::Lifecycle;
pub use model::ProviderState;
