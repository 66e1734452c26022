pub mod header;
pub mod player;
pub mod sidebar;
pub mod toast;
pub mod tracks;
