//! rusty-forms validation rules
//!
//! Pure functions with no UI knowledge. The form validator in `rusty-forms`
//! and the wasm bindings both call into these, so the browser and any native
//! caller agree on what a valid registration looks like.

pub mod email;
pub mod password;
pub mod string;

pub use email::*;
pub use password::*;
pub use string::*;
