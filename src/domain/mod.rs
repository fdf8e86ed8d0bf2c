pub mod error;

// Ad import domain module
pub mod ads;
