pub mod archive;
pub mod dedup;

pub use archive::ArchiveLogic;
