pub mod folder;
pub mod image_io;
