// CSV decoding and writing
pub mod csv;
pub mod config;
