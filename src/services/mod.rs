pub mod demo_world;
pub mod sprite_cache;

pub use demo_world::DemoWorld;
pub use sprite_cache::SpriteCache;
