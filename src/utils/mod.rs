//! Text helpers shared across modules

pub mod markup;
pub mod sentences;
