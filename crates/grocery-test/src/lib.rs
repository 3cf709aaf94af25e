#![doc = include_str!("../README.md")]

mod repository;

pub use repository::{FailingRepository, MemoryRepository};
