pub mod app;
pub mod artwork;
pub mod catalog;
pub mod config;
pub mod notifier;
pub mod player;
pub mod playlist;
pub mod ui;
