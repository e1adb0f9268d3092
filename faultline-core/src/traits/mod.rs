//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and the output devices driven by `faultline-drivers`.

pub mod alert;
pub mod display;

pub use alert::AlertOutput;
pub use display::{DisplayDriver, DisplayError, DisplayExt};
