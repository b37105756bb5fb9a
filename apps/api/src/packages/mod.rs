pub mod codec;
pub mod handlers;
pub mod normalize;
