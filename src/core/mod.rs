pub mod canvas;
pub mod host;
pub mod input;
pub mod space;
