pub mod events;
pub mod rows;
