pub mod app;
pub mod boundary;
pub mod braille;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod list;
pub mod map;
pub mod persistence;
pub mod tracker;
pub mod ui;
