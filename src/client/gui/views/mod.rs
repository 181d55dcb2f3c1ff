pub mod common;
pub mod events;
pub mod friends;
pub mod groups;
pub mod home;
pub mod layout;
pub mod logger;
pub mod login;
pub mod profile;
