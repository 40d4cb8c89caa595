pub mod events;
pub mod table;
