// Copyright (C) 2020 Kevin Del Castillo Ramírez
//
// This file is part of recommend.
//
// recommend is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// recommend is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with recommend.  If not, see <http://www.gnu.org/licenses/>.

pub mod error;
pub mod filters;
pub mod fuzzy;
pub mod knn;
pub mod maped_distance;
pub mod similarity_matrix;
pub mod tfidf;
pub mod tokenize;
pub mod utils;

use crate::{
    error::ErrorKind,
    fuzzy::{MatchKind, Suggestion, TitleIndex},
    knn::Knn,
    maped_distance::MapedDistance,
    similarity_matrix::SimilarityMatrix,
    tfidf::TfidfVectorizer,
    utils::SparseVector,
};
use anyhow::Error;
use config::{Config, EngineConfig};
use controller::{Controller, Movie, TextField};

/// A movie together with how it was ranked
#[derive(Debug, Clone, Copy)]
pub struct Scored<'a> {
    pub movie: &'a Movie,
    pub score: f64,
}

/// The movie a query resolved to
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub movie: &'a Movie,
    pub kind: MatchKind,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct Recommendation<'a> {
    pub query: String,
    pub searched: Option<Hit<'a>>,
    pub similar: Vec<Scored<'a>>,
    pub same_genre: Vec<Scored<'a>>,
    pub same_crew: Vec<Scored<'a>>,
    pub top_rated_genre: Vec<&'a Movie>,
    /// Only filled when the query didn't match any title and the dataset
    /// carries popularity
    pub popular: Vec<&'a Movie>,
}

pub struct Engine<'a, C: Controller> {
    controller: &'a C,
    config: EngineConfig,
    fields: Vec<TextField>,

    vectorizer: TfidfVectorizer,
    vectors: Vec<SparseVector>,
    matrix: SimilarityMatrix,
    titles: TitleIndex,
}

impl<'a, C: Controller> Engine<'a, C> {
    pub fn with_controller(controller: &'a C, config: &Config) -> Result<Self, Error> {
        let fields = if config.engine.document_fields.is_empty() {
            controller.document_fields().to_vec()
        } else {
            config
                .engine
                .document_fields
                .iter()
                .map(|f| f.parse::<TextField>())
                .collect::<Result<Vec<_>, _>>()?
        };

        log::info!(
            "Vectorizing {} movies from {} using {:?}",
            controller.movies().len(),
            controller.name(),
            fields
        );

        let documents = controller.documents(&fields);
        let mut vectorizer = TfidfVectorizer::new();
        let vectors = vectorizer.fit_transform(&documents);

        let matrix = if config.cache.enabled {
            let fingerprint = similarity_matrix::fingerprint(&documents);
            SimilarityMatrix::load_or_compute(&config.cache.path, &vectors, fingerprint)?
        } else {
            SimilarityMatrix::compute(&vectors)?
        };

        let titles = TitleIndex::build(controller.movies().iter().map(|m| m.title.as_str()));

        Ok(Self {
            controller,
            config: config.engine.clone(),
            fields,
            vectorizer,
            vectors,
            matrix,
            titles,
        })
    }

    pub fn controller(&self) -> &'a C {
        self.controller
    }

    pub fn fields(&self) -> &[TextField] {
        &self.fields
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    fn movies(&self) -> &'a [Movie] {
        self.controller.movies()
    }

    fn scored(&self, distances: Vec<MapedDistance>) -> Vec<Scored<'a>> {
        let movies = self.movies();
        distances
            .into_iter()
            .map(|MapedDistance(i, score)| Scored {
                movie: &movies[i],
                score,
            })
            .collect()
    }

    fn indexed(&self, indices: Vec<usize>) -> Vec<&'a Movie> {
        let movies = self.movies();
        indices.into_iter().map(|i| &movies[i]).collect()
    }

    /// Autocomplete for a partially typed title
    pub fn suggest(&self, query: &str) -> Vec<Suggestion> {
        self.titles
            .suggestions(query, self.config.suggestions, self.config.fuzzy_cutoff)
    }

    pub fn resolve(&self, query: &str) -> Result<Hit<'a>, Error> {
        if query.trim().is_empty() {
            return Err(ErrorKind::EmptyQuery.into());
        }

        let found = self
            .titles
            .resolve(query, self.config.fuzzy_cutoff)
            .ok_or_else(|| ErrorKind::MovieNotFound(query.trim().into()))?;

        if found.kind != MatchKind::Exact {
            log::debug!("'{}' resolved to '{}' ({:.3})", query, found.title, found.score);
        }

        Ok(Hit {
            movie: &self.movies()[found.index],
            kind: found.kind,
            score: found.score,
        })
    }

    /// The `n` most similar movies, never the movie itself or a duplicate row of it
    pub fn similar(&self, index: usize, n: usize) -> Result<Vec<Scored<'a>>, Error> {
        let movies = self.movies();
        let target = movies.get(index).ok_or(ErrorKind::IndexOutOfBound)?;
        let row = self.matrix.row(index)?;

        let mut knn = Knn::new(n.min(movies.len()));
        knn.update(
            row.into_iter()
                .enumerate()
                .filter(|(i, _)| *i != index && !movies[*i].same_title(&target.title))
                .map(|(i, score)| MapedDistance(i, score)),
        );

        Ok(self.scored(knn.into_vec()))
    }

    /// Rank every movie against free text, as if it were one more overview
    pub fn similar_to_text(&self, text: &str, n: usize) -> Vec<Scored<'a>> {
        let query = self.vectorizer.transform(text);
        if query.is_empty() {
            return Vec::new();
        }

        let mut knn = Knn::new(n.min(self.vectors.len()));
        knn.update(
            self.vectors
                .iter()
                .enumerate()
                .map(|(i, vector)| MapedDistance(i, utils::dot(&query, vector)))
                .filter(|d| d.dist() > 0.0),
        );

        self.scored(knn.into_vec())
    }

    pub fn same_genre(&self, index: usize, n: usize) -> Result<Vec<Scored<'a>>, Error> {
        let found = filters::same_genre(self.movies(), &self.matrix, index, n)?;
        Ok(self.scored(found))
    }

    pub fn same_crew(&self, index: usize, n: usize) -> Result<Vec<Scored<'a>>, Error> {
        let found = filters::same_crew(self.movies(), &self.matrix, index, n)?;
        Ok(self.scored(found))
    }

    /// Top rated movies, all genres when `genre` is `None` or blank
    pub fn top_rated(&self, genre: Option<&str>) -> Vec<&'a Movie> {
        let found = filters::top_rated(
            self.movies(),
            genre,
            self.config.min_votes,
            None,
            self.config.top_n,
        );

        self.indexed(found)
    }

    pub fn popular(&self, n: usize) -> Vec<&'a Movie> {
        self.indexed(filters::popular(self.movies(), n))
    }

    pub fn recommend(&self, query: &str) -> Result<Recommendation<'a>, Error> {
        let n = self.config.top_n;

        let hit = match self.resolve(query) {
            Ok(hit) => hit,
            Err(e) => match e.downcast_ref::<ErrorKind>() {
                Some(ErrorKind::MovieNotFound(_)) => {
                    // Datasets without popularity would just list the first rows
                    let popular = if self.movies().iter().all(|m| m.popularity == 0.0) {
                        log::warn!(
                            "'{}' not found and {} has no popularity data, nothing to fall back to",
                            query.trim(),
                            self.controller.name()
                        );
                        Vec::new()
                    } else {
                        log::info!("'{}' not found, falling back to popular movies", query.trim());
                        self.popular(n)
                    };

                    return Ok(Recommendation {
                        query: query.trim().into(),
                        searched: None,
                        similar: Vec::new(),
                        same_genre: Vec::new(),
                        same_crew: Vec::new(),
                        top_rated_genre: Vec::new(),
                        popular,
                    });
                }

                _ => return Err(e),
            },
        };

        let index = hit.movie.id;
        let top_rated_genre = match hit.movie.genres.first() {
            Some(genre) => self.indexed(filters::top_rated(
                self.movies(),
                Some(genre.as_str()),
                self.config.min_votes,
                Some(index),
                n,
            )),
            None => Vec::new(),
        };

        Ok(Recommendation {
            query: query.trim().into(),
            searched: Some(hit),
            similar: self.similar(index, n)?,
            same_genre: self.same_genre(index, n)?,
            same_crew: self.same_crew(index, n)?,
            top_rated_genre,
            popular: Vec::new(),
        })
    }
}
