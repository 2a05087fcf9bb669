pub mod allocator;
pub mod builder;
pub mod classifier;
pub mod extractor;
pub mod hasher;
pub mod reexport;
pub mod scanner;
