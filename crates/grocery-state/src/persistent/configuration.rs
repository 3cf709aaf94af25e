use std::path::PathBuf;

/// Configuration for the database backing persistent repositories.
#[derive(Debug, Clone)]
pub enum DatabaseConfiguration {
    /// SQLite database stored on disk as `<folder_path>/<db_name>.sqlite`.
    Sqlite {
        /// The database name, without extension.
        db_name: String,
        /// The folder containing the database file. It must already exist.
        folder_path: PathBuf,
    },

    /// SQLite database kept in memory, discarded when the last handle is dropped.
    InMemory,
}
