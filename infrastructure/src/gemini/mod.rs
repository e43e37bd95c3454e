//! Gemini REST backend

pub mod gateway;
pub mod types;

pub use gateway::{GeminiGateway, GeminiSettings};
