pub mod handlers;
pub mod resolver;
pub mod upload;
