pub mod codec;
pub mod fs;
pub mod progress;
