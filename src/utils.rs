// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use controller::{Movie, ToTable};
use engine::{fuzzy::Suggestion, Recommendation, Scored};
use prettytable::{cell, format::consts::FORMAT_NO_LINESEP, row, Table};

fn genres(movie: &Movie) -> String {
    movie.genres.join(", ")
}

pub(crate) fn scored_table(list: &[Scored]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["#", "title", "genres", "similarity"]);

    for (pos, scored) in list.iter().enumerate() {
        table.add_row(row![
            pos + 1,
            scored.movie.title,
            genres(scored.movie),
            format!("{:.4}", scored.score)
        ]);
    }

    table.set_format(*FORMAT_NO_LINESEP);
    table
}

pub(crate) fn movies_table(list: &[&Movie]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["#", "title", "genres", "rating", "votes", "popularity"]);

    for (pos, movie) in list.iter().enumerate() {
        table.add_row(row![
            pos + 1,
            movie.title,
            genres(movie),
            format!("{:.1}", movie.vote_average),
            movie.vote_count,
            format!("{:.2}", movie.popularity)
        ]);
    }

    table.set_format(*FORMAT_NO_LINESEP);
    table
}

pub(crate) fn suggestions_table(list: &[Suggestion]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["#", "title", "match", "score"]);

    for (pos, suggestion) in list.iter().enumerate() {
        table.add_row(row![
            pos + 1,
            suggestion.title,
            format!("{:?}", suggestion.kind).to_lowercase(),
            format!("{:.3}", suggestion.score)
        ]);
    }

    table.set_format(*FORMAT_NO_LINESEP);
    table
}

pub(crate) fn info_table(movie: &Movie, poster_base: &str) -> Table {
    let mut table = movie.to_table();
    if let Some(url) = movie.poster_url(poster_base) {
        table.add_row(row!["poster", url]);
    }

    table
}

fn print_section(name: &str, table: Table, empty: bool) {
    println!("{}:", name);
    if empty {
        println!("  (none)");
    } else {
        table.printstd();
    }
}

pub(crate) fn print_recommendation(rec: &Recommendation, poster_base: &str) {
    let searched = match rec.searched {
        Some(hit) => hit,
        None if rec.popular.is_empty() => {
            println!("Couldn't find '{}'", rec.query);
            return;
        }

        None => {
            println!("Couldn't find '{}', showing popular movies instead", rec.query);
            print_section("Popular", movies_table(&rec.popular), false);
            return;
        }
    };

    if !searched.movie.same_title(&rec.query) {
        println!("Showing results for '{}'", searched.movie.title);
    }

    info_table(searched.movie, poster_base).printstd();

    print_section("Similar", scored_table(&rec.similar), rec.similar.is_empty());
    print_section(
        "Same genre",
        scored_table(&rec.same_genre),
        rec.same_genre.is_empty(),
    );
    print_section(
        "Same director",
        scored_table(&rec.same_crew),
        rec.same_crew.is_empty(),
    );

    let genre = searched.movie.genres.first().map(String::as_str).unwrap_or("");
    print_section(
        format!("Top rated {}", genre).trim_end(),
        movies_table(&rec.top_rated_genre),
        rec.top_rated_genre.is_empty(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::fuzzy::MatchKind;

    fn movie(id: usize, title: &str) -> Movie {
        Movie {
            id,
            title: title.into(),
            genres: vec!["Drama".into(), "Romance".into()],
            vote_average: 7.5,
            vote_count: 120,
            popularity: 3.5,
            poster_path: Some("/abc.jpg".into()),
            ..Default::default()
        }
    }

    #[test]
    fn scored_rows() {
        let a = movie(0, "Titanic");
        let b = movie(1, "The Notebook");
        let list = vec![
            Scored { movie: &a, score: 0.5 },
            Scored { movie: &b, score: 0.25 },
        ];

        let table = scored_table(&list);
        assert_eq!(table.len(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("Drama, Romance"));
        assert!(rendered.contains("0.5000"));
    }

    #[test]
    fn movie_rows() {
        let a = movie(0, "Titanic");
        let table = movies_table(&[&a]);

        assert_eq!(table.len(), 1);
        assert!(table.to_string().contains("7.5"));
    }

    #[test]
    fn suggestion_rows() {
        let list = vec![Suggestion {
            index: 0,
            title: "Titanic".into(),
            kind: MatchKind::Prefix,
            score: 0.9,
        }];

        let rendered = suggestions_table(&list).to_string();
        assert!(rendered.contains("prefix"));
        assert!(rendered.contains("0.900"));
    }

    #[test]
    fn info_has_poster() {
        let a = movie(0, "Titanic");
        let rendered = info_table(&a, "https://image.tmdb.org/t/p/w500/").to_string();

        assert!(rendered.contains("https://image.tmdb.org/t/p/w500/abc.jpg"));

        let no_poster = Movie {
            poster_path: None,
            ..movie(1, "Titanic")
        };
        assert!(!info_table(&no_poster, "http://x").to_string().contains("poster"));
    }
}
