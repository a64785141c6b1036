// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use controller::{values, Movie};
use serde::Deserialize;

/// One row of the merged TMDB export, every cell kept as raw text
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMovie {
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Overview")]
    pub overview: String,
    pub release_date: String,
    pub vote_average: String,
    pub vote_count: String,
    pub popularity: String,
    #[serde(alias = "Genres", alias = "genre")]
    pub genres: String,
    #[serde(alias = "Director", alias = "crew")]
    pub director: String,
    #[serde(alias = "Cast")]
    pub cast: String,
    pub poster_path: String,
}

impl RawMovie {
    pub fn into_movie(self, id: usize) -> Movie {
        let poster_path = values::parse_text(&self.poster_path);

        Movie {
            id,
            title: values::parse_text(&self.title),
            overview: values::parse_text(&self.overview),
            release_date: values::parse_text(&self.release_date),
            genres: values::parse_list(&self.genres),
            director: values::parse_text(&self.director),
            cast: values::parse_list(&self.cast),
            vote_average: values::parse_f64(&self.vote_average),
            vote_count: values::parse_count(&self.vote_count),
            popularity: values::parse_f64(&self.popularity),
            poster_path: if poster_path.is_empty() {
                None
            } else {
                Some(poster_path)
            },
        }
    }
}
