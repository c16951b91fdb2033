#![forbid(unsafe_code)]

pub mod file;
pub mod records;
pub mod repository;

pub use file::FileCatalogRepository;
pub use records::{VocabRecord, decode_catalog, encode_catalog};
pub use repository::{CatalogError, CatalogRepository, InMemoryCatalogRepository, Storage};
