pub mod list;
pub mod pack;
pub mod reexport;
pub mod unpack;
