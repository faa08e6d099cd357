pub mod date;
pub mod error;
pub mod io;
pub mod recurrence;
pub mod row;
pub mod sheet;
pub mod store;
pub mod sync;
pub mod types;

pub use error::{DeliveryError, Result};
