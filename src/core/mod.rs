pub mod color;
pub mod descriptor;
pub mod error;
pub mod placeholder;
pub mod renderer;
