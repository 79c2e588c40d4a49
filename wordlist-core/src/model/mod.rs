pub mod entry;
pub mod theme;
