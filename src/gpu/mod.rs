//! GPU presentation of the software canvas.

mod present;

pub use present::{Presenter, PRESENT_SHADER};
