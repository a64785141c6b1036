// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use anyhow::Error;
use controller::{error::ErrorKind, values, Controller, Movie, TextField};
use serde::Deserialize;
use std::{fs::File, io::Read, path::Path};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct Row {
    #[serde(rename = "MOVIE", alias = "movie")]
    movie: String,
    #[serde(rename = "GENRE", alias = "genre")]
    genre: String,
    #[serde(rename = "ACTOR", alias = "actor")]
    actor: String,
    #[serde(rename = "DIRECTOR", alias = "director")]
    director: String,
}

/// The small movie table with only `MOVIE, GENRE, ACTOR, DIRECTOR`
pub struct ImdbSimpleController {
    movies: Vec<Movie>,
}

impl ImdbSimpleController {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        log::info!("Loading simple movie table from {}", path.display());

        Self::from_reader(File::open(path)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, Error> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv.headers()?.clone();
        if !headers.iter().any(|h| h.eq_ignore_ascii_case("movie")) {
            return Err(ErrorKind::MissingColumn("MOVIE").into());
        }

        let mut movies = Vec::new();
        for row in csv.deserialize::<Row>() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    log::warn!("Skipping malformed row: {}", e);
                    continue;
                }
            };

            let title = values::parse_text(&row.movie);
            if title.is_empty() {
                continue;
            }

            movies.push(Movie {
                id: movies.len(),
                title,
                genres: values::parse_list(&row.genre),
                cast: values::parse_list(&row.actor),
                director: values::parse_text(&row.director),
                ..Default::default()
            });
        }

        log::info!("Loaded {} movies", movies.len());

        if movies.is_empty() {
            Err(ErrorKind::EmptyDataset("imdb-simple".into()).into())
        } else {
            Ok(Self { movies })
        }
    }
}

impl Controller for ImdbSimpleController {
    fn name(&self) -> &str {
        "imdb-simple"
    }

    fn movies(&self) -> &[Movie] {
        &self.movies
    }

    // Genre, actors and director combined into a single document
    fn document_fields(&self) -> &[TextField] {
        &[TextField::Genres, TextField::Cast, TextField::Director]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "MOVIE,GENRE,ACTOR,DIRECTOR
Inception,Sci-Fi|Thriller,Leonardo DiCaprio,Christopher Nolan
Interstellar,Sci-Fi,\"Matthew McConaughey, Anne Hathaway\",Christopher Nolan
,Drama,Nobody,Nobody
Titanic,Romance,Leonardo DiCaprio,
";

    #[test]
    fn loads_combined_documents() -> Result<(), Error> {
        let controller = ImdbSimpleController::from_reader(DATA.as_bytes())?;
        let docs = controller.documents(controller.document_fields());

        assert_eq!(docs.len(), 3);
        assert_eq!(
            docs[0],
            "Sci-Fi Thriller Leonardo DiCaprio Christopher Nolan"
        );
        assert_eq!(docs[2], "Romance Leonardo DiCaprio");
        assert_eq!(controller.movies()[2].id, 2);

        Ok(())
    }

    #[test]
    fn requires_movie_column() {
        let data = "TITLE,GENRE\nInception,Sci-Fi\n";
        assert!(ImdbSimpleController::from_reader(data.as_bytes()).is_err());
    }
}
