use crate::{error::ErrorKind, utils::SparseVector};
use anyhow::Error;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

const CACHE_VERSION: u32 = 1;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Pairwise cosine similarities, stored as the packed upper triangle
/// (diagonal included) of a symmetric `size x size` matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

#[derive(Serialize, Deserialize)]
struct CachedMatrix {
    version: u32,
    fingerprint: u64,
    matrix: SimilarityMatrix,
}

fn fnv1a(hash: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(hash, |h, &b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}

/// Identifies a corpus, a cache built from other documents is never reused.
///
/// 64-bit FNV-1a over length-prefixed documents, so the value written to a
/// cache file stays the same across toolchains and platforms.
pub fn fingerprint<S: AsRef<str>>(documents: &[S]) -> u64 {
    let hash = fnv1a(FNV_OFFSET, &(documents.len() as u64).to_le_bytes());
    documents.iter().fold(hash, |h, doc| {
        let bytes = doc.as_ref().as_bytes();
        let h = fnv1a(h, &(bytes.len() as u64).to_le_bytes());
        fnv1a(h, bytes)
    })
}

impl SimilarityMatrix {
    /// Expects unit length vectors, so every entry is a plain dot product
    pub fn compute(vectors: &[SparseVector]) -> Result<Self, ErrorKind> {
        let size = vectors.len();
        if size == 0 {
            return Err(ErrorKind::EmptyCorpus);
        }

        // Inverted index: term => (document, weight), documents ascending
        let terms = vectors
            .iter()
            .flat_map(|v| v.iter().map(|(term, _)| term + 1))
            .max()
            .unwrap_or(0);

        let mut postings: Vec<Vec<(usize, f64)>> = vec![Vec::new(); terms];
        for (doc, vector) in vectors.iter().enumerate() {
            for &(term, weight) in vector {
                postings[term].push((doc, weight));
            }
        }

        let progress = ProgressBar::new(size as u64);
        progress.set_style(
            ProgressStyle::default_bar().template("{msg} [{bar:40}] {pos}/{len} ({eta})"),
        );
        progress.set_message("similarity");

        let mut values = Vec::with_capacity(size * (size + 1) / 2);
        let mut acc = vec![0.0f64; size];

        for (i, vector) in vectors.iter().enumerate() {
            for &(term, weight) in vector {
                let list = &postings[term];
                let start = list.partition_point(|(doc, _)| *doc < i);

                for &(j, other) in &list[start..] {
                    acc[j] += weight * other;
                }
            }

            for value in acc[i..].iter_mut() {
                values.push(*value as f32);
                *value = 0.0;
            }

            progress.inc(1);
        }

        progress.finish_and_clear();
        log::info!("Computed {}x{} similarity matrix", size, size);

        Ok(Self { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i <= j { (i, j) } else { (j, i) };
        // Row i starts after rows 0..i, of lengths size, size - 1, ...
        i * self.size - i * i.saturating_sub(1) / 2 + (j - i)
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.size || j >= self.size {
            return None;
        }

        self.values.get(self.offset(i, j)).map(|v| f64::from(*v))
    }

    /// Similarities of `i` against every movie, in dataset order
    pub fn row(&self, i: usize) -> Result<Vec<f64>, ErrorKind> {
        if i >= self.size {
            return Err(ErrorKind::IndexOutOfBound);
        }

        Ok((0..self.size)
            .map(|j| f64::from(self.values[self.offset(i, j)]))
            .collect())
    }

    pub fn save(&self, path: impl AsRef<Path>, fingerprint: u64) -> Result<(), Error> {
        let writer = BufWriter::new(File::create(path)?);
        let cached = CachedMatrix {
            version: CACHE_VERSION,
            fingerprint,
            matrix: self.clone(),
        };

        bincode::serialize_into(writer, &cached)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>, fingerprint: u64, size: usize) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path)?);
        let cached: CachedMatrix = bincode::deserialize_from(reader)?;

        let stale = cached.version != CACHE_VERSION
            || cached.fingerprint != fingerprint
            || cached.matrix.size != size
            || cached.matrix.values.len() != size * (size + 1) / 2;

        if stale {
            Err(ErrorKind::StaleCache {
                expected: size,
                found: cached.matrix.size,
            }
            .into())
        } else {
            Ok(cached.matrix)
        }
    }

    /// Reuse the flat-file cache when it belongs to this corpus, otherwise
    /// compute the matrix and (try to) write it back.
    pub fn load_or_compute(
        path: impl AsRef<Path>,
        vectors: &[SparseVector],
        fingerprint: u64,
    ) -> Result<Self, Error> {
        let path = path.as_ref();

        if path.exists() {
            match Self::load(path, fingerprint, vectors.len()) {
                Ok(matrix) => {
                    log::info!("Loaded similarity matrix from {}", path.display());
                    return Ok(matrix);
                }

                Err(e) => log::warn!("Ignoring cache {}: {}", path.display(), e),
            }
        }

        let matrix = Self::compute(vectors)?;
        match matrix.save(path, fingerprint) {
            Ok(()) => log::info!("Saved similarity matrix to {}", path.display()),
            Err(e) => log::warn!("Couldn't write cache {}: {}", path.display(), e),
        }

        Ok(matrix)
    }
}
