//! Built-in pipeline node implementations.

pub mod channel;
pub mod collect;
pub mod combine;
pub mod iter_source;
pub mod map;

pub use channel::{ChannelSink, ChannelSource};
pub use collect::Collect;
pub use combine::Combine;
pub use iter_source::IterSource;
pub use map::Map;
