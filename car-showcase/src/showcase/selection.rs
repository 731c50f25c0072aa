use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Position in the catalog. Always in `[0, len)` once the catalog is known.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarSelection {
    index: usize,
    len: usize,
}

impl CarSelection {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Advance with wraparound; `len - 1` goes to `0`.
    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Retreat with wraparound; `0` goes to `len - 1`.
    pub fn previous(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    /// Jump to `index` if it is in range.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        self.index = index;
        Some(index)
    }
}

/// What the user asked the showcase to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionCommand {
    Next,
    Previous,
    Select(usize),
    /// Reload the current car, e.g. after a failed fetch.
    Retry,
}

/// Origin of a selection for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Button,
    Keyboard,
    Dom,
    Rpc,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SelectionEvent {
    pub command: SelectionCommand,
    pub source: SelectionSource,
}

/// Request for the lifecycle manager to show catalog entry `index`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadModelRequest {
    pub index: usize,
}

/// Turn user commands into wrapped indices and load requests.
pub fn handle_selection_events(
    mut events: EventReader<SelectionEvent>,
    mut selection: ResMut<CarSelection>,
    mut requests: EventWriter<LoadModelRequest>,
) {
    for event in events.read() {
        let index = match event.command {
            SelectionCommand::Next => selection.next(),
            SelectionCommand::Previous => selection.previous(),
            SelectionCommand::Retry => selection.index(),
            SelectionCommand::Select(index) => match selection.select(index) {
                Some(index) => index,
                None => {
                    warn!(
                        "Ignoring selection of car {} from {:?}: catalog has {} cars",
                        index,
                        event.source,
                        selection.len()
                    );
                    continue;
                }
            },
        };

        debug!("{:?} via {:?} → car {}", event.command, event.source, index);
        requests.write(LoadModelRequest { index });
    }
}

/// Load whatever is selected when the showcase starts running.
pub fn request_initial_model(
    selection: Res<CarSelection>,
    mut requests: EventWriter<LoadModelRequest>,
) {
    requests.write(LoadModelRequest {
        index: selection.index(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut selection = CarSelection::new(5);
        let visited: Vec<usize> = (0..5).map(|_| selection.next()).collect();
        assert_eq!(visited, [1, 2, 3, 4, 0]);
    }

    #[test]
    fn previous_wraps_from_first_to_last() {
        let mut selection = CarSelection::new(5);
        assert_eq!(selection.previous(), 4);
        assert_eq!(selection.previous(), 3);
    }

    #[test]
    fn single_car_catalog_stays_put() {
        let mut selection = CarSelection::new(1);
        assert_eq!(selection.next(), 0);
        assert_eq!(selection.previous(), 0);
    }

    #[test]
    fn out_of_range_select_keeps_current_index() {
        let mut selection = CarSelection::new(5);
        selection.next();
        assert_eq!(selection.select(5), None);
        assert_eq!(selection.index(), 1);
        assert_eq!(selection.select(4), Some(4));
    }

    #[test]
    fn selection_events_become_load_requests() {
        let mut app = App::new();
        app.add_event::<SelectionEvent>()
            .add_event::<LoadModelRequest>()
            .insert_resource(CarSelection::new(5))
            .add_systems(Update, handle_selection_events);

        for command in [
            SelectionCommand::Previous,
            SelectionCommand::Select(9),
            SelectionCommand::Retry,
            SelectionCommand::Select(2),
        ] {
            app.world_mut().send_event(SelectionEvent {
                command,
                source: SelectionSource::Rpc,
            });
        }
        app.update();

        let requests: Vec<usize> = app
            .world_mut()
            .resource_mut::<Events<LoadModelRequest>>()
            .drain()
            .map(|r| r.index)
            .collect();
        assert_eq!(requests, [4, 4, 2]);
        assert_eq!(app.world().resource::<CarSelection>().index(), 2);
    }
}
