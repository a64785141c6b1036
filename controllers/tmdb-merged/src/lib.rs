// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod models;

use crate::models::RawMovie;
use anyhow::Error;
use controller::{error::ErrorKind, Controller, Movie, TextField};
use std::{fs::File, io::Read, path::Path};

pub struct TmdbMergedController {
    movies: Vec<Movie>,
}

impl TmdbMergedController {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        log::info!("Loading merged movies from {}", path.display());

        let file = File::open(path)?;
        Self::from_reader(file).map_err(|e| {
            log::error!("Failed to load {}", path.display());
            e
        })
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        if !headers.iter().any(|h| h == "title" || h == "Title") {
            return Err(ErrorKind::MissingColumn("title").into());
        }

        let mut movies = Vec::new();
        let mut skipped = 0;

        for record in csv.deserialize::<RawMovie>() {
            match record {
                Ok(raw) => {
                    let movie = raw.into_movie(movies.len());
                    if movie.title.is_empty() {
                        skipped += 1;
                    } else {
                        movies.push(movie);
                    }
                }

                Err(e) => {
                    log::warn!("Skipping malformed row: {}", e);
                    skipped += 1;
                }
            }
        }

        log::info!("Loaded {} movies ({} rows skipped)", movies.len(), skipped);

        if movies.is_empty() {
            Err(ErrorKind::EmptyDataset("tmdb-merged".into()).into())
        } else {
            Ok(Self { movies })
        }
    }
}

impl Controller for TmdbMergedController {
    fn name(&self) -> &str {
        "tmdb-merged"
    }

    fn movies(&self) -> &[Movie] {
        &self.movies
    }

    fn document_fields(&self) -> &[TextField] {
        &[TextField::Overview]
    }
}
