//! Bridge between the host page's specs panel and the showcase.
//!
//! Button clicks arrive through JS callbacks, so they are queued behind a
//! mutex and drained into [`SelectionEvent`]s on the next frame, the same
//! way the RPC bridge handles `postMessage`.

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::showcase::selection::{SelectionCommand, SelectionEvent, SelectionSource};

#[cfg(target_arch = "wasm32")]
use crate::showcase::panel::ShowcasePanel;

#[cfg(target_arch = "wasm32")]
use constants::dom::{
    GEARBOX_ID, LOGO_ID, NAME_ID, NEXT_BUTTON_ID, POWER_ID, PREVIOUS_BUTTON_ID, PRICE_ID,
    SPEED_ID, STATUS_ID, WEB_ASSET_ROOT,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, closure::Closure};

#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Event, window};

/// Commands clicked on the page since the last frame.
#[derive(Resource, Clone, Default)]
pub struct DomButtonQueue(Arc<Mutex<Vec<SelectionCommand>>>);

impl DomButtonQueue {
    pub fn push(&self, command: SelectionCommand) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(command);
        }
    }

    fn take(&self) -> Vec<SelectionCommand> {
        self.0
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }
}

pub fn drain_dom_buttons(
    queue: Option<Res<DomButtonQueue>>,
    mut selections: EventWriter<SelectionEvent>,
) {
    let Some(queue) = queue else {
        return;
    };

    for command in queue.take() {
        selections.write(SelectionEvent {
            command,
            source: SelectionSource::Dom,
        });
    }
}

#[cfg(target_arch = "wasm32")]
fn document() -> Option<Document> {
    window().and_then(|window| window.document())
}

/// Attach click listeners to the page's next/previous buttons.
#[cfg(target_arch = "wasm32")]
pub fn setup_dom_buttons(mut commands: Commands) {
    let queue = DomButtonQueue::default();

    let Some(document) = document() else {
        error!("Document not available, page buttons disabled");
        commands.insert_resource(queue);
        return;
    };

    for (id, command) in [
        (NEXT_BUTTON_ID, SelectionCommand::Next),
        (PREVIOUS_BUTTON_ID, SelectionCommand::Previous),
    ] {
        let Some(button) = document.get_element_by_id(id) else {
            warn!("Button #{} not found on page", id);
            continue;
        };

        let queue_clone = queue.clone();
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            queue_clone.push(command);
        }) as Box<dyn FnMut(Event)>);

        if let Err(e) =
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register click listener on #{}: {:?}", id, e);
        }

        // Listener lives for the page's lifetime.
        closure.forget();
    }

    commands.insert_resource(queue);
}

/// Copy the panel resource into the page's specs elements.
#[cfg(target_arch = "wasm32")]
pub fn sync_dom_panel(panel: Res<ShowcasePanel>) {
    if !panel.is_changed() {
        return;
    }
    let Some(document) = document() else {
        return;
    };

    for (id, value) in [
        (NAME_ID, panel.name.as_str()),
        (PRICE_ID, panel.price.as_str()),
        (SPEED_ID, panel.top_speed.as_str()),
        (POWER_ID, panel.power.as_str()),
        (GEARBOX_ID, panel.gearbox.as_str()),
    ] {
        match document.get_element_by_id(id) {
            Some(element) => element.set_text_content(Some(value)),
            None => warn!("Panel element #{} not found", id),
        }
    }

    // Status element is optional on the page.
    if let Some(status) = document.get_element_by_id(STATUS_ID) {
        status.set_text_content(Some(&panel.status.message()));
        let state = if panel.status.is_failure() { "error" } else { "ok" };
        if let Err(e) = status.set_attribute("data-state", state) {
            warn!("Failed to mark status element: {:?}", e);
        }
    }

    if panel.logo_path.is_empty() {
        return;
    }
    let Some(logo) = document.get_element_by_id(LOGO_ID) else {
        warn!("Panel element #{} not found", LOGO_ID);
        return;
    };
    let src = format!("{}/{}", WEB_ASSET_ROOT, panel.logo_path);
    if let Err(e) = logo
        .set_attribute("src", &src)
        .and_then(|_| logo.set_attribute("alt", &panel.name))
    {
        error!("Failed to update #{}: {:?}", LOGO_ID, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_clicks_drain_in_order_once() {
        let mut app = App::new();
        let queue = DomButtonQueue::default();
        app.add_event::<SelectionEvent>()
            .insert_resource(queue.clone())
            .add_systems(Update, drain_dom_buttons);

        queue.push(SelectionCommand::Next);
        queue.push(SelectionCommand::Previous);
        app.update();
        app.update();

        let events: Vec<SelectionEvent> = app
            .world_mut()
            .resource_mut::<Events<SelectionEvent>>()
            .drain()
            .collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].command, SelectionCommand::Next);
        assert_eq!(events[1].command, SelectionCommand::Previous);
        assert!(events.iter().all(|e| e.source == SelectionSource::Dom));
    }
}
