// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: DB/email/identity adapters
// - presentation: HTTP handlers and routing
// - application: use cases, ports and errors
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
