//! Request handler module
//!
//! Entry point for every request on the listening socket.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
