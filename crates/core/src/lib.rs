#![forbid(unsafe_code)]

pub mod export;
pub mod fallback;
pub mod model;
pub mod time;

pub use fallback::FallbackClassifier;
pub use time::Clock;
