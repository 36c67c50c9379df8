// The page: event-driven controller, pure renderer, HTML output and HTTP handlers.
// All model calls go through the controller; handlers never call llm_client.

pub mod controller;
pub mod handlers;
pub mod page;
pub mod render;
