// HTTP middleware
pub mod api_key;
pub mod deadline;
pub mod rate_limit;

pub use api_key::*;
pub use deadline::*;
pub use rate_limit::*;
