use crate::engine::assets::catalog::ShowcaseCatalog;
use crate::showcase::lifecycle::{LoadOutcome, ModelLifecycle};
use crate::showcase::panel::ShowcasePanel;
use crate::showcase::selection::{CarSelection, SelectionCommand, SelectionEvent, SelectionSource};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_load_outcomes,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) = window
                .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
            }
        }
        None => error!("Window object not available"),
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Read-only view of the showcase that RPC methods answer from.
struct ShowcaseView<'a> {
    catalog: Option<&'a ShowcaseCatalog>,
    selection: Option<&'a CarSelection>,
    panel: &'a ShowcasePanel,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut selection_events: EventWriter<SelectionEvent>,
    catalog: Option<Res<ShowcaseCatalog>>,
    selection: Option<Res<CarSelection>>,
    panel: Res<ShowcasePanel>,
) {
    let view = ShowcaseView {
        catalog: catalog.as_deref(),
        selection: selection.as_deref(),
        panel: &*panel,
    };

    for event in events.read() {
        let request = match parse_request(&event.content) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(response) => {
                rpc_interface.queue_response(response);
                continue;
            }
        };

        debug!("RPC method: {}", request.method);

        let mut commands = Vec::new();
        let response = handle_rpc_request(&request, &view, &mut commands);

        for command in commands {
            selection_events.write(SelectionEvent {
                command,
                source: SelectionSource::Rpc,
            });
        }
        if let Some(response) = response {
            rpc_interface.queue_response(response);
        }
    }
}

/// Turn a raw message into a request.
///
/// Messages without a `method` (responses, foreign traffic) are ignored and
/// never answered. Malformed JSON gets a -32700; a malformed request with a
/// method gets a -32600 carrying its id.
fn parse_request(content: &str) -> Result<Option<RpcRequest>, RpcResponse> {
    let value = match serde_json::from_str::<serde_json::Value>(content) {
        Ok(value) => value,
        Err(parse_error) => {
            warn!("Unparsable RPC message: {}", parse_error);
            return Err(create_error_response(
                serde_json::Value::Null,
                -32700,
                "Parse error",
                Some(serde_json::json!({"detail": parse_error.to_string()})),
            ));
        }
    };

    if value.get("method").is_none() {
        debug!("Ignoring RPC message without a method");
        return Ok(None);
    }

    let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
    serde_json::from_value::<RpcRequest>(value)
        .map(Some)
        .map_err(|error| {
            warn!("Invalid RPC request: {}", error);
            create_error_response(
                id,
                -32600,
                "Invalid Request",
                Some(serde_json::json!({"detail": error.to_string()})),
            )
        })
}

/// Handle individual RPC request and generate response based on method.
///
/// Navigation methods append to `commands`; the caller turns them into
/// selection events. Notifications (no ID) are executed but not answered.
fn handle_rpc_request(
    request: &RpcRequest,
    view: &ShowcaseView,
    commands: &mut Vec<SelectionCommand>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "next_car" => handle_navigation(SelectionCommand::Next, view, commands),
        "previous_car" => handle_navigation(SelectionCommand::Previous, view, commands),
        "retry_load" => handle_navigation(SelectionCommand::Retry, view, commands),
        "select_car" => handle_select_car(&request.params, view, commands),
        "get_catalog" => handle_get_catalog(view),
        "get_current_car" => handle_get_current_car(view),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                request.id.clone()?,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn loaded_catalog<'a>(view: &ShowcaseView<'a>) -> Result<&'a ShowcaseCatalog, RpcError> {
    view.catalog
        .ok_or_else(|| RpcError::internal_error("Catalog not loaded"))
}

/// Next/previous/retry: queue the command once a catalog is available.
fn handle_navigation(
    command: SelectionCommand,
    view: &ShowcaseView,
    commands: &mut Vec<SelectionCommand>,
) -> Result<serde_json::Value, RpcError> {
    loaded_catalog(view)?;
    commands.push(command);

    Ok(serde_json::json!({
        "success": true,
        "command": command
    }))
}

/// Jump to a catalog index with range validation.
fn handle_select_car(
    params: &serde_json::Value,
    view: &ShowcaseView,
    commands: &mut Vec<SelectionCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(serde::Deserialize)]
    struct SelectCarParams {
        index: usize,
    }

    let select_params = serde_json::from_value::<SelectCarParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'index' parameter"))?;

    let catalog = loaded_catalog(view)?;
    let entry = catalog.get(select_params.index).ok_or_else(|| {
        RpcError::invalid_params(&format!(
            "Index {} out of range for {} cars",
            select_params.index,
            catalog.len()
        ))
    })?;

    commands.push(SelectionCommand::Select(select_params.index));
    info!("Car selection dispatched: {}", entry.name);

    Ok(serde_json::json!({
        "success": true,
        "index": select_params.index,
        "name": entry.name
    }))
}

fn handle_get_catalog(view: &ShowcaseView) -> Result<serde_json::Value, RpcError> {
    let catalog = loaded_catalog(view)?;
    Ok(serde_json::json!({
        "count": catalog.len(),
        "cars": catalog.cars
    }))
}

/// Selected index plus what the panel currently shows.
fn handle_get_current_car(view: &ShowcaseView) -> Result<serde_json::Value, RpcError> {
    let selection = view
        .selection
        .ok_or_else(|| RpcError::internal_error("Catalog not loaded"))?;

    Ok(serde_json::json!({
        "index": selection.index(),
        "count": selection.len(),
        "panel": view.panel
    }))
}

/// Forward load results of the latest request to the host page.
fn notify_load_outcomes(
    mut outcomes: EventReader<LoadOutcome>,
    lifecycle: Option<Res<ModelLifecycle>>,
    catalog: Option<Res<ShowcaseCatalog>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(lifecycle) = lifecycle else {
        return;
    };

    for outcome in outcomes.read() {
        let name = catalog
            .as_ref()
            .and_then(|catalog| catalog.get(outcome.index()))
            .map(|entry| entry.name.clone());

        match outcome {
            LoadOutcome::Loaded { index, generation } if *generation == lifecycle.generation() => {
                rpc_interface.send_notification(
                    "car_loaded",
                    serde_json::json!({"index": index, "name": name}),
                );
            }
            LoadOutcome::Failed {
                index,
                generation,
                reason,
            } if *generation == lifecycle.generation() => {
                rpc_interface.send_notification(
                    "car_load_failed",
                    serde_json::json!({
                        "index": index,
                        "name": name,
                        "reason": reason.to_string()
                    }),
                );
            }
            _ => {}
        }
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    match window.parent().ok().flatten() {
                        // Standalone page: there is no host to talk to.
                        Some(parent) if parent == window => {}
                        Some(parent) => {
                            if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                                error!("Failed to send message to parent: {:?}", e);
                            }
                        }
                        None => warn!("No parent window available for message transmission"),
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}
