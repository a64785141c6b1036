// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod entity;
pub mod error;
pub mod movie;
pub mod searchby;
pub mod values;

use anyhow::Error;
use error::ErrorKind;

pub use entity::{Entity, ToTable};
pub use movie::{Movie, TextField};
pub use searchby::SearchBy;

pub type Result<T> = std::result::Result<T, Error>;

pub trait Controller {
    /// Short name of the dataset, used in prompts and logs
    fn name(&self) -> &str;

    /// Get all movies, in dataset order
    fn movies(&self) -> &[Movie];

    /// Fields vectorized when the configuration doesn't say otherwise
    fn document_fields(&self) -> &[TextField];

    /// Get a single movie by its row position
    fn movie(&self, id: usize) -> Result<&Movie> {
        self.movies()
            .get(id)
            .ok_or_else(|| ErrorKind::NotFoundById(id.to_string()).into())
    }

    /// Get movies that matched the search criteria by id, name or custom (genre, director, cast)
    fn movies_by(&self, by: &SearchBy) -> Result<Vec<&Movie>> {
        let found: Vec<&Movie> = match by {
            SearchBy::Id(id) => {
                let id: usize = id
                    .trim()
                    .parse()
                    .map_err(|_| ErrorKind::NotFoundById(id.clone()))?;

                vec![self.movie(id)?]
            }

            SearchBy::Name(name) => self
                .movies()
                .iter()
                .filter(|movie| movie.same_title(name))
                .collect(),

            SearchBy::Custom(key, val) => {
                let matcher: fn(&Movie, &str) -> bool = match key.as_str() {
                    "genre" | "genres" => Movie::has_genre,
                    "director" => Movie::has_director,
                    "cast" | "actor" => Movie::has_cast_member,
                    _ => return Err(ErrorKind::NotFoundByCustom(key.clone(), val.clone()).into()),
                };

                self.movies()
                    .iter()
                    .filter(|movie| matcher(movie, val))
                    .collect()
            }
        };

        if found.is_empty() {
            let err = match by {
                SearchBy::Id(id) => ErrorKind::NotFoundById(id.clone()),
                SearchBy::Name(name) => ErrorKind::NotFoundByName(name.clone()),
                SearchBy::Custom(key, val) => ErrorKind::NotFoundByCustom(key.clone(), val.clone()),
            };

            Err(err.into())
        } else {
            Ok(found)
        }
    }

    /// Build one document per movie out of the given fields
    fn documents(&self, fields: &[TextField]) -> Vec<String> {
        self.movies().iter().map(|movie| movie.text(fields)).collect()
    }
}
