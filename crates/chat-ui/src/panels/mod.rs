pub mod sidebar;
pub mod chat;
pub mod input;
