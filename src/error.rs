//! Error types shared by the catalog pipeline and the Spotify client.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single request against the remote catalog.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("token error: {0}")]
    Token(String),
    #[error("{0}")]
    Other(String),
}

/// Pipeline stage a request belonged to when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchArtist,
    FetchReleases,
    LoadReleases,
    LoadTrackPages,
    EnrichTracks,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::FetchArtist => "fetch artist",
            Stage::FetchReleases => "fetch releases",
            Stage::LoadReleases => "load releases",
            Stage::LoadTrackPages => "load track pages",
            Stage::EnrichTracks => "enrich tracks",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("not authorized: {0}")]
    Unauthorized(String),
    #[error("{stage} failed ({context}): {source}")]
    Upstream {
        stage: Stage,
        context: String,
        #[source]
        source: ClientError,
    },
    #[error("playlist chunk {chunk}/{chunks} failed after {inserted} inserted tracks: {source}")]
    PlaylistInsert {
        chunk: usize,
        chunks: usize,
        inserted: usize,
        #[source]
        source: ClientError,
    },
    #[error("cannot create playlist: {0}")]
    PlaylistCreate(#[source] ClientError),
    #[error("config error: {0}")]
    Config(String),
}

impl CatalogError {
    pub(crate) fn upstream(stage: Stage, context: impl Into<String>, source: ClientError) -> Self {
        CatalogError::Upstream {
            stage,
            context: context.into(),
            source,
        }
    }
}
