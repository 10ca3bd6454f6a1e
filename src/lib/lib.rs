// src/lib/lib.rs

// modules
pub mod clock;
pub mod date;
pub mod process;
pub mod text;
pub mod timer;
pub mod version;

// re-exports
pub use clock::*;
pub use date::*;
pub use process::*;
pub use text::*;
pub use timer::*;
pub use version::*;
