// HTTP routes
pub mod capabilities;
pub mod health;
pub mod info;
pub mod read_link;

pub use capabilities::*;
pub use health::*;
pub use info::*;
pub use read_link::*;
