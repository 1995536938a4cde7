//! WebSocket live feed of completed ticks.

mod handler;

pub use handler::live_feed_handler;
