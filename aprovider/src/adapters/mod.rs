//! Backend adapters.

pub mod gemini;
