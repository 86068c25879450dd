pub mod byteset;
pub mod config;
pub mod error;

pub use byteset::ByteSet;
pub use config::{TableConfig, PICO8_CHARSET, PICO8_PREFIX, PICO8_SUFFIX};
pub use error::{CpError, Result};
