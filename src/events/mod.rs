pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_close_on_escape;
pub use pointer::{wire_input_handlers, InputWiring};
