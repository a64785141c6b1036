// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::{entity::Entity, error::ErrorKind};
use common_macros::hash_map;
use std::{collections::HashMap, fmt, str::FromStr};

/// Columns that can be fed to the vectorizer
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextField {
    Title,
    Overview,
    Genres,
    Director,
    Cast,
}

impl FromStr for TextField {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" | "movie" => Ok(Self::Title),
            "overview" => Ok(Self::Overview),
            "genres" | "genre" => Ok(Self::Genres),
            "director" => Ok(Self::Director),
            "cast" | "actor" | "actors" => Ok(Self::Cast),
            other => Err(ErrorKind::UnknownField(other.into())),
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Overview => "overview",
            Self::Genres => "genres",
            Self::Director => "director",
            Self::Cast => "cast",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Movie {
    /// Row position in the dataset
    pub id: usize,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub genres: Vec<String>,
    pub director: String,
    pub cast: Vec<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub popularity: f64,
    pub poster_path: Option<String>,
}

impl Movie {
    /// The document the vectorizer sees for this movie
    pub fn text(&self, fields: &[TextField]) -> String {
        let mut parts: Vec<&str> = Vec::new();

        for field in fields {
            match field {
                TextField::Title => parts.push(&self.title),
                TextField::Overview => parts.push(&self.overview),
                TextField::Genres => parts.extend(self.genres.iter().map(String::as_str)),
                TextField::Director => parts.push(&self.director),
                TextField::Cast => parts.extend(self.cast.iter().map(String::as_str)),
            }
        }

        parts
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn poster_url(&self, base: &str) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|path| format!("{}{}", base.trim_end_matches('/'), path))
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        let genre = genre.trim();
        self.genres.iter().any(|g| g.eq_ignore_ascii_case(genre))
    }

    pub fn has_director(&self, director: &str) -> bool {
        let director = director.trim();
        !director.is_empty() && self.director.trim().eq_ignore_ascii_case(director)
    }

    pub fn has_cast_member(&self, member: &str) -> bool {
        let member = member.trim();
        self.cast.iter().any(|m| m.eq_ignore_ascii_case(member))
    }

    pub fn same_title(&self, title: &str) -> bool {
        self.title.trim().to_lowercase() == title.trim().to_lowercase()
    }
}

impl Entity for Movie {
    type Id = usize;

    fn get_id(&self) -> usize {
        self.id
    }

    fn get_data(&self) -> HashMap<String, String> {
        let mut data = hash_map! {
            "title".into() => self.title.clone(),
            "rating".into() => format!("{:.1} / 10 ({} votes)", self.vote_average, self.vote_count),
        };

        let optional = vec![
            ("overview", self.overview.clone()),
            ("release date", self.release_date.clone()),
            ("genres", self.genres.join(", ")),
            ("director", self.director.clone()),
            ("cast", self.cast.join(", ")),
        ];

        for (key, value) in optional {
            if !value.is_empty() {
                data.insert(key.into(), value);
            }
        }

        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alien() -> Movie {
        Movie {
            id: 3,
            title: "Alien".into(),
            overview: "A crew meets a deadly creature.".into(),
            genres: vec!["Horror".into(), "Science Fiction".into()],
            director: "Ridley Scott".into(),
            cast: vec!["Sigourney Weaver".into()],
            poster_path: Some("/alien.jpg".into()),
            ..Default::default()
        }
    }

    #[test]
    fn text_joins_selected_fields() {
        let movie = alien();

        assert_eq!(
            movie.text(&[TextField::Genres, TextField::Cast, TextField::Director]),
            "Horror Science Fiction Sigourney Weaver Ridley Scott"
        );
        assert_eq!(movie.text(&[TextField::Overview]), movie.overview);
    }

    #[test]
    fn text_skips_empty_fields() {
        let movie = Movie {
            title: "Untitled".into(),
            ..Default::default()
        };

        assert_eq!(movie.text(&[TextField::Overview, TextField::Title]), "Untitled");
    }

    #[test]
    fn field_names() {
        assert_eq!("Genre".parse::<TextField>().ok(), Some(TextField::Genres));
        assert_eq!("actor".parse::<TextField>().ok(), Some(TextField::Cast));
        assert!("budget".parse::<TextField>().is_err());
        assert_eq!(TextField::Overview.to_string(), "overview");
    }

    #[test]
    fn membership_is_case_insensitive() {
        let movie = alien();

        assert!(movie.has_genre("horror"));
        assert!(!movie.has_genre("Comedy"));
        assert!(movie.has_director("ridley scott"));
        assert!(!movie.has_director(""));
        assert!(movie.has_cast_member("SIGOURNEY WEAVER"));
        assert!(movie.same_title(" alien "));
    }

    #[test]
    fn poster_url_uses_base() {
        let movie = alien();
        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/w500/").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/alien.jpg")
        );
        assert_eq!(Movie::default().poster_url("http://x"), None);
    }
}
