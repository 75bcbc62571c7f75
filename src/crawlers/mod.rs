pub mod batch;
pub mod renderer;
pub mod web;

pub use renderer::{PageSnapshot, Renderer};
