pub mod config;
pub mod gui;
pub mod models;
pub mod screens;
pub mod services;
pub mod utils;
