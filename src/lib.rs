// src/lib.rs

pub mod classifier;
pub mod history;
pub mod model;
pub mod report;
pub mod score;
pub mod smells;
pub mod walker;
