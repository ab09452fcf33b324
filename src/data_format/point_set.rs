//! Dense point sets.
//!
//! A point set is an `[N, D]` row-major array of features. The owned
//! [`PointSet`] is what callers build; the engine works on borrowed
//! [`PointSetRef`] views so it never copies or retains caller data.

use crate::error::{KnnError, Result};
use crate::types::{DimensionIndex, PointIndex, Scalar};

/// An owned, immutable `[N, D]` array of points.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet<T: Scalar> {
    /// Contiguous row-major storage.
    data: Vec<T>,

    /// Number of points.
    num_points: usize,

    /// Number of features per point.
    dimensionality: DimensionIndex,
}

impl<T: Scalar> PointSet<T> {
    /// Create an empty point set with the given dimensionality.
    pub fn empty(dimensionality: DimensionIndex) -> Self {
        Self {
            data: Vec::new(),
            num_points: 0,
            dimensionality,
        }
    }

    /// Create a point set from a flat row-major buffer.
    pub fn from_flat(data: Vec<T>, dimensionality: DimensionIndex) -> Result<Self> {
        if dimensionality == 0 {
            if data.is_empty() {
                return Ok(Self::empty(0));
            }
            return Err(KnnError::invalid_argument("Dimensionality cannot be 0"));
        }
        if data.len() % dimensionality != 0 {
            return Err(KnnError::ragged(format!(
                "buffer length {} is not a multiple of dimensionality {}",
                data.len(),
                dimensionality
            )));
        }

        let num_points = data.len() / dimensionality;
        Ok(Self {
            data,
            num_points,
            dimensionality,
        })
    }

    /// Create a point set from one vector per point.
    ///
    /// The dimensionality is taken from the first row; an empty input yields
    /// an empty set of dimensionality 0.
    pub fn from_vecs(rows: Vec<Vec<T>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::empty(0));
        };
        let dimensionality = first.len();

        let mut data = Vec::with_capacity(rows.len() * dimensionality);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dimensionality {
                return Err(KnnError::ragged(format!(
                    "point {} has {} features, expected {}",
                    i,
                    row.len(),
                    dimensionality
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            num_points: rows.len(),
            dimensionality,
        })
    }

    /// Build from a buffer already known to hold `num_points * dimensionality` values.
    pub(crate) fn from_rows_unchecked(
        data: Vec<T>,
        num_points: usize,
        dimensionality: DimensionIndex,
    ) -> Self {
        debug_assert_eq!(data.len(), num_points * dimensionality);
        Self {
            data,
            num_points,
            dimensionality,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.num_points
    }

    /// Whether the set holds no points.
    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    /// Number of features per point.
    pub fn dimensionality(&self) -> DimensionIndex {
        self.dimensionality
    }

    /// Borrow the point at `index`.
    pub fn point(&self, index: PointIndex) -> Option<&[T]> {
        self.view().point(index)
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[T]> + '_ {
        self.view().into_rows()
    }

    /// The flat row-major storage.
    pub fn raw_data(&self) -> &[T] {
        &self.data
    }

    /// Borrowed view of the whole set.
    pub fn view(&self) -> PointSetRef<'_, T> {
        PointSetRef {
            data: &self.data,
            num_points: self.num_points,
            dimensionality: self.dimensionality,
        }
    }

    /// Consume the set and return its flat storage.
    pub fn into_raw(self) -> Vec<T> {
        self.data
    }
}

/// Borrowed `[N, D]` view into a point set.
#[derive(Debug, Clone, Copy)]
pub struct PointSetRef<'a, T: Scalar> {
    data: &'a [T],
    num_points: usize,
    dimensionality: DimensionIndex,
}

impl<'a, T: Scalar> PointSetRef<'a, T> {
    /// View a flat row-major buffer as `[len / dimensionality, dimensionality]`.
    pub fn from_flat(data: &'a [T], dimensionality: DimensionIndex) -> Result<Self> {
        if dimensionality == 0 {
            if data.is_empty() {
                return Ok(Self {
                    data,
                    num_points: 0,
                    dimensionality: 0,
                });
            }
            return Err(KnnError::invalid_argument("Dimensionality cannot be 0"));
        }
        if data.len() % dimensionality != 0 {
            return Err(KnnError::ragged(format!(
                "buffer length {} is not a multiple of dimensionality {}",
                data.len(),
                dimensionality
            )));
        }
        Ok(Self {
            data,
            num_points: data.len() / dimensionality,
            dimensionality,
        })
    }

    /// View a single point as a one-row set, including a zero-feature point.
    pub(crate) fn single(point: &'a [T]) -> Self {
        Self {
            data: point,
            num_points: 1,
            dimensionality: point.len(),
        }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.num_points
    }

    /// Whether the view holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }

    /// Number of features per point.
    #[inline]
    pub fn dimensionality(&self) -> DimensionIndex {
        self.dimensionality
    }

    /// Flat row-major storage.
    #[inline]
    pub fn raw_data(&self) -> &'a [T] {
        self.data
    }

    /// Borrow the point at `index`.
    #[inline]
    pub fn point(&self, index: PointIndex) -> Option<&'a [T]> {
        if index >= self.num_points {
            return None;
        }
        let start = index * self.dimensionality;
        Some(&self.data[start..start + self.dimensionality])
    }

    /// Iterate over the points in order.
    pub fn into_rows(self) -> impl ExactSizeIterator<Item = &'a [T]> {
        let dim = self.dimensionality;
        let data = self.data;
        (0..self.num_points).map(move |i| &data[i * dim..(i + 1) * dim])
    }

    /// Sub-view of the points in `start..end`.
    pub fn slice_rows(&self, start: usize, end: usize) -> PointSetRef<'a, T> {
        debug_assert!(start <= end && end <= self.num_points);
        PointSetRef {
            data: &self.data[start * self.dimensionality..end * self.dimensionality],
            num_points: end - start,
            dimensionality: self.dimensionality,
        }
    }

    /// Location `(point, feature)` of the first NaN or infinite value.
    pub fn first_non_finite(&self) -> Option<(PointIndex, DimensionIndex)> {
        let pos = self.data.iter().position(|v| !v.is_finite())?;
        Some((pos / self.dimensionality, pos % self.dimensionality))
    }
}

impl<'a, T: Scalar> From<&'a PointSet<T>> for PointSetRef<'a, T> {
    fn from(set: &'a PointSet<T>) -> Self {
        set.view()
    }
}
