pub mod block;
pub mod center;
pub mod code;
pub mod image;
pub mod section;
