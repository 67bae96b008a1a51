//! The PIN entry widget: a row of single-digit slots.

mod pin_input_component;
mod slots_view;
mod state;
mod surface;

pub use pin_input_component::PinInputComponent;
pub use state::PinInputState;
pub use surface::{InputSurface, KeyboardSurface, SurfaceContext, TouchSurface, surface_for};
