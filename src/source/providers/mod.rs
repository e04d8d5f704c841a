// src/source/providers/mod.rs
pub mod kworb;

pub use kworb::KworbProvider;
