use crate::{error::ErrorKind, maped_distance::MapedDistance, similarity_matrix::SimilarityMatrix};
use controller::Movie;
use std::cmp::Ordering;

// Neither the movie itself nor a duplicate row of it
fn is_other(movies: &[Movie], target: usize, candidate: usize) -> bool {
    candidate != target && !movies[candidate].same_title(&movies[target].title)
}

fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Movies sharing a genre, most shared genres first, then most similar
pub fn same_genre(
    movies: &[Movie],
    matrix: &SimilarityMatrix,
    target: usize,
    n: usize,
) -> Result<Vec<MapedDistance>, ErrorKind> {
    let movie = movies.get(target).ok_or(ErrorKind::IndexOutOfBound)?;
    let row = matrix.row(target)?;

    let mut found: Vec<(usize, MapedDistance)> = movies
        .iter()
        .enumerate()
        .filter(|(i, _)| is_other(movies, target, *i))
        .filter_map(|(i, other)| {
            let shared = movie.genres.iter().filter(|g| other.has_genre(g)).count();
            if shared > 0 {
                Some((shared, MapedDistance(i, row[i])))
            } else {
                None
            }
        })
        .collect();

    found.sort_by(|(shared_a, a), (shared_b, b)| shared_b.cmp(shared_a).then_with(|| b.cmp(a)));

    Ok(found.into_iter().take(n).map(|(_, d)| d).collect())
}

/// Movies by the same director, most similar first
pub fn same_crew(
    movies: &[Movie],
    matrix: &SimilarityMatrix,
    target: usize,
    n: usize,
) -> Result<Vec<MapedDistance>, ErrorKind> {
    let movie = movies.get(target).ok_or(ErrorKind::IndexOutOfBound)?;
    if movie.director.trim().is_empty() {
        return Ok(Vec::new());
    }

    let row = matrix.row(target)?;
    let mut found: Vec<MapedDistance> = movies
        .iter()
        .enumerate()
        .filter(|(i, other)| is_other(movies, target, *i) && other.has_director(&movie.director))
        .map(|(i, _)| MapedDistance(i, row[i]))
        .collect();

    found.sort_by(|a, b| b.cmp(a));
    found.truncate(n);

    Ok(found)
}

/// Best rated movies with enough votes, optionally inside a genre
pub fn top_rated(
    movies: &[Movie],
    genre: Option<&str>,
    min_votes: u64,
    exclude: Option<usize>,
    n: usize,
) -> Vec<usize> {
    let genre = genre.map(str::trim).filter(|g| !g.is_empty());

    let mut found: Vec<usize> = movies
        .iter()
        .enumerate()
        .filter(|(i, _)| exclude.map_or(true, |target| is_other(movies, target, *i)))
        .filter(|(_, movie)| movie.vote_count >= min_votes)
        .filter(|(_, movie)| genre.map_or(true, |g| movie.has_genre(g)))
        .map(|(i, _)| i)
        .collect();

    found.sort_by(|&a, &b| {
        by_score_desc(movies[a].vote_average, movies[b].vote_average)
            .then_with(|| movies[b].vote_count.cmp(&movies[a].vote_count))
            .then_with(|| a.cmp(&b))
    });
    found.truncate(n);

    found
}

/// Most popular movies, the fallback when a title can't be found
pub fn popular(movies: &[Movie], n: usize) -> Vec<usize> {
    let mut found: Vec<usize> = (0..movies.len()).collect();

    found.sort_by(|&a, &b| {
        by_score_desc(movies[a].popularity, movies[b].popularity).then_with(|| a.cmp(&b))
    });
    found.truncate(n);

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfidf::TfidfVectorizer;

    fn movie(
        id: usize,
        title: &str,
        overview: &str,
        genres: &[&str],
        director: &str,
        rating: (f64, u64),
        popularity: f64,
    ) -> Movie {
        Movie {
            id,
            title: title.into(),
            overview: overview.into(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            director: director.into(),
            vote_average: rating.0,
            vote_count: rating.1,
            popularity,
            ..Default::default()
        }
    }

    fn catalog() -> (Vec<Movie>, SimilarityMatrix) {
        let movies = vec![
            movie(0, "Alien", "crew hunted by alien creature in space", &["Horror", "Science Fiction"], "Ridley Scott", (8.1, 900), 40.0),
            movie(1, "Aliens", "marines fight alien creatures in space", &["Action", "Science Fiction", "Horror"], "James Cameron", (7.9, 800), 35.0),
            movie(2, "Gladiator", "general becomes gladiator in rome", &["Action", "Drama"], "Ridley Scott", (8.0, 1000), 50.0),
            movie(3, "Prometheus", "crew finds alien origins in space", &["Science Fiction"], "Ridley Scott", (6.4, 700), 45.0),
            movie(4, "Alien", "duplicate row of the same movie", &["Horror"], "Ridley Scott", (8.1, 10), 1.0),
            movie(5, "Titanic", "lovers on a doomed ship", &["Drama", "Romance"], "James Cameron", (7.5, 30), 60.0),
        ];

        let docs: Vec<_> = movies.iter().map(|m| m.overview.clone()).collect();
        let vectors = TfidfVectorizer::new().fit_transform(&docs);
        let matrix = SimilarityMatrix::compute(&vectors).unwrap();

        (movies, matrix)
    }

    fn indices(found: Vec<MapedDistance>) -> Vec<usize> {
        found.into_iter().map(|d| d.index()).collect()
    }

    #[test]
    fn same_genre_ranks_shared_genres_first() -> Result<(), ErrorKind> {
        let (movies, matrix) = catalog();
        let found = indices(same_genre(&movies, &matrix, 0, 10)?);

        // Aliens shares two genres, Prometheus one; the duplicate row is skipped
        assert_eq!(found, vec![1, 3]);
        Ok(())
    }

    #[test]
    fn same_crew_orders_by_similarity() -> Result<(), ErrorKind> {
        let (movies, matrix) = catalog();
        let found = indices(same_crew(&movies, &matrix, 0, 10)?);

        assert_eq!(found, vec![3, 2]);
        assert_eq!(indices(same_crew(&movies, &matrix, 0, 1)?), vec![3]);
        Ok(())
    }

    #[test]
    fn out_of_bound_target() {
        let (movies, matrix) = catalog();
        assert!(same_genre(&movies, &matrix, 99, 5).is_err());
        assert!(same_crew(&movies, &matrix, 99, 5).is_err());
    }

    #[test]
    fn top_rated_filters_votes_and_genre() {
        let (movies, _) = catalog();

        assert_eq!(top_rated(&movies, None, 50, None, 3), vec![0, 2, 1]);
        assert_eq!(top_rated(&movies, Some("horror"), 50, Some(0), 5), vec![1]);
        assert_eq!(top_rated(&movies, Some(" "), 0, None, 2), vec![0, 4]);
    }

    #[test]
    fn popular_fallback() {
        let (movies, _) = catalog();
        assert_eq!(popular(&movies, 3), vec![5, 2, 3]);
        assert!(popular(&movies, 0).is_empty());
    }
}
