pub mod item;
pub mod recipe;
pub mod search;
pub mod types;
