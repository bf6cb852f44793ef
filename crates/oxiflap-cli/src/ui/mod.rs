pub use self::renderer::*;

pub mod widgets;

mod renderer;
