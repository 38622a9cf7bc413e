//! Hardware bring-up.

pub mod hw_init;
