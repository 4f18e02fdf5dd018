pub mod agenda;
pub mod app;
pub mod calendar;
pub mod cmds;
pub mod config;
pub mod context;
pub mod events;
pub mod family;
pub mod ui;
