// Copyright (C) 2020 Kevin Del Castillo Ramírez
//
// This file is part of recommendation-system.
//
// recommendation-system is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// recommendation-system is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with recommendation-system.  If not, see <http://www.gnu.org/licenses/>.

use num_traits::float::Float;
use std::cmp::Ordering;
use std::ops::AddAssign;

/// Sparse vector as `(term index, weight)` pairs sorted by term index
pub type SparseVector<V = f64> = Vec<(usize, V)>;

// Both vectors are sorted by index, so a single merge pass finds
// every common term.
pub fn dot<V>(a: &[(usize, V)], b: &[(usize, V)]) -> V
where
    V: Float + AddAssign,
{
    let (mut i, mut j) = (0, 0);
    let mut acc = V::zero();

    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                acc += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    acc
}

pub fn l2_norm<V>(a: &[(usize, V)]) -> V
where
    V: Float + AddAssign,
{
    let mut acc = V::zero();
    for (_, x) in a {
        acc += *x * *x;
    }

    acc.sqrt()
}

/// Scale to unit length, a zero vector is left untouched
pub fn normalize<V>(a: &mut [(usize, V)])
where
    V: Float + AddAssign,
{
    let norm = l2_norm(a);
    if norm > V::zero() {
        for (_, x) in a.iter_mut() {
            *x = *x / norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn dot_only_counts_common_terms() {
        let a = vec![(0, 1.0), (2, 2.0), (5, 3.0)];
        let b = vec![(1, 4.0), (2, 0.5), (5, 1.0), (9, 7.0)];

        assert_approx_eq!(dot(&a, &b), 4.0);
        assert_approx_eq!(dot(&a, &[]), 0.0);
    }

    #[test]
    fn normalize_gives_unit_length() {
        let mut a = vec![(0, 3.0f32), (4, 4.0)];
        normalize(&mut a);

        assert_approx_eq!(a[0].1, 0.6f32);
        assert_approx_eq!(a[1].1, 0.8f32);
        assert_approx_eq!(l2_norm(&a), 1.0f32);
    }

    #[test]
    fn normalize_keeps_zero_vector() {
        let mut a: SparseVector = vec![];
        normalize(&mut a);
        assert!(a.is_empty());
        assert_approx_eq!(l2_norm(&a), 0.0);
    }
}
