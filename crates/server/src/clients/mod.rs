pub mod archive_source;
pub mod chess_com;
#[cfg(test)]
pub mod mock;

pub use archive_source::ArchiveSource;
pub use chess_com::ChessComClient;
