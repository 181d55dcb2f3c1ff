pub mod api_client;
pub mod events_service;
pub mod friends_service;
pub mod groups_service;
pub mod oauth;
pub mod session;
pub mod users_service;
