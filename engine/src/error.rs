use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Empty query, please enter a movie title")]
    EmptyQuery,

    #[error("Couldn't find a movie matching '{0}'")]
    MovieNotFound(String),

    #[error("Indices out of bounds")]
    IndexOutOfBound,

    #[error("Cannot build a similarity matrix over an empty corpus")]
    EmptyCorpus,

    #[error("Cached matrix is stale (expected {expected} movies, found {found})")]
    StaleCache { expected: usize, found: usize },
}
