//! Cache infrastructure - client implementations

mod factory;
mod in_memory;
mod redis;

pub use factory::{ClientFactory, ClientType};
pub use in_memory::InMemoryClient;
pub use redis::RedisClient;
