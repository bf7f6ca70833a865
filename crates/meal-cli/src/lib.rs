//! Library side of the `meal-filter` command.

pub mod logging;
pub mod replay;
pub mod request;
pub mod rows;
