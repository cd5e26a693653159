pub mod cloudinary_media_store;
pub mod in_memory_media_store;

pub use cloudinary_media_store::CloudinaryMediaStore;
pub use in_memory_media_store::InMemoryMediaStore;
