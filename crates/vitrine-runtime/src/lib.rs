//! Vitrine runtime
//!
//! Single-threaded event loop with a virtual millisecond clock. The host
//! pulls one runnable task at a time and fully handles it before asking for
//! the next, so handlers never interleave.

mod event_loop;

pub use event_loop::{EventLoop, TimerId};
