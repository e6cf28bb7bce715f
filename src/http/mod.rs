//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID / trace / timeout layers)
//!     → request.rs (buffer body, build HandlerRequest)
//!     → routing::Dispatcher (exact METHOD:path lookup)
//!     → handler, or stub.rs for static stub endpoints
//!     → response.rs (HandlerResponse → Axum response)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod stub;

pub use request::{HandlerRequest, X_REQUEST_ID};
pub use response::HandlerResponse;
pub use server::{HttpServer, Server};
pub use stub::{StubError, StubPayload, StubResolver};
