//! Small vector types for mesh data.

pub mod vec4;

pub use vec4::Vec4;
