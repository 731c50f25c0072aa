use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    LoadingCatalog,
    Running,
    /// Catalog missing or invalid; nothing can be shown.
    CatalogFailed,
}

pub fn log_state_transitions(mut transitions: EventReader<StateTransitionEvent<AppState>>) {
    for transition in transitions.read() {
        debug!("AppState {:?} → {:?}", transition.exited, transition.entered);
    }
}
