//! HTTP protocol layer module
//!
//! Response builders shared by the router and the API handlers.

pub mod response;

// Re-export commonly used builders
pub use response::{
    apply_common_headers, build_404_response, build_405_response, build_413_response,
    build_health_response, build_options_response, json_response, message_response,
};
