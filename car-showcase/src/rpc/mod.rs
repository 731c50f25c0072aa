//! JSON-RPC 2.0 communication layer for embedding the showcase in a host page.
//!
//! Implements bidirectional messaging between the Bevy engine and the page via
//! iframe postMessage, supporting both request-response and notification patterns.
//!
//! ## Architecture
//!
//! The RPC system uses standard JSON-RPC 2.0 protocol with:
//! - **Requests**: Expect responses with matching IDs
//! - **Notifications**: One-way messages without responses
//! - **Responses**: Reply to requests with results or errors
//!
//! ## Message Flow
//!
//! ```text
//! Host (Parent Window)   <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Adding New RPC Methods
//!
//! ### 1. Define Request Handler
//!
//! Add a new method case in `handle_rpc_request()`:
//!
//! ```rust,ignore
//! fn handle_rpc_request(request: &RpcRequest, view: &ShowcaseView, ...) -> Option<RpcResponse> {
//!     let result = match request.method.as_str() {
//!         "your_method_name" => handle_your_method(&request.params, view),
//!         // ... existing methods
//!         _ => return Some(create_error_response(id, -32601, "Method not found", None)),
//!     };
//!     // ... response creation
//! }
//! ```
//!
//! ### 2. Implement Handler Function
//!
//! ```rust,ignore
//! fn handle_your_method(params: &Value, view: &ShowcaseView) -> Result<Value, RpcError> {
//!     #[derive(Deserialize)]
//!     struct YourParams {
//!         index: usize,
//!     }
//!
//!     let parsed = serde_json::from_value::<YourParams>(params.clone())
//!         .map_err(|_| RpcError::invalid_params("Expected 'index' parameter"))?;
//!
//!     Ok(json!({
//!         "success": true,
//!         "index": parsed.index
//!     }))
//! }
//! ```
//!
//! ### 3. Call From the Host Page
//!
//! ```typescript
//! // Request-response pattern
//! iframe.contentWindow.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "select_car",
//!   params: { index: 2 },
//!   id: 1
//! }), "*");
//!
//! // Notification pattern (no response expected)
//! iframe.contentWindow.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "next_car"
//! }), "*");
//! ```
//!
//! ## Sending Notifications from Bevy
//!
//! Use `WebRpcInterface::send_notification()` to push updates to the page:
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("car_loaded", json!({
//!         "index": 1,
//!         "name": "REVUELTO"
//!     }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32700`: Parse error
//! - `-32600`: Invalid request (has a `method` but the wrong shape)
//! - `-32601`: Method not found
//! - `-32602`: Invalid params (e.g. `select_car` index out of range)
//! - `-32603`: Internal error (e.g. catalog not loaded yet)
//!
//! Messages without a `method` are ignored, so responses echoed back to a
//! standalone page are never answered. When the page is not framed, nothing
//! is posted at all.
//!
//! ## Existing Methods
//!
//! ### Navigation
//! - `next_car` / `previous_car`: Step through the catalog with wraparound
//! - `select_car`: Jump to `{ index }`
//! - `retry_load`: Reload the selected car after a failure
//!
//! ### Queries
//! - `get_catalog`: List every car with its specs
//! - `get_current_car`: Selected index and the panel contents
//!
//! ### Notifications
//! - `catalog_loaded`: Catalog parsed and validated
//! - `car_loaded` / `car_load_failed`: Outcome of the latest load request

/// JSON-RPC 2.0 bidirectional communication system for host page integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
