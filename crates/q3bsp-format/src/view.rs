//! Bounds-checked typed views over the file buffer
//!
//! A [`LumpView`] is a byte slice plus a record stride. Construction checks
//! that the lump lies in the file and is a whole number of records; after
//! that every access is an index into the slice.

use crate::error::{BspError, Result};
use crate::lump::LumpDescriptor;
use crate::records::{LumpRecord, RecordRun};
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Borrowed sequence of fixed-size records
pub struct LumpView<'a, T> {
    bytes: &'a [u8],
    _record: PhantomData<fn() -> T>,
}

impl<'a, T: LumpRecord> LumpView<'a, T> {
    /// Validate `descriptor` against `file` and build the view
    pub fn new(file: &'a [u8], descriptor: LumpDescriptor) -> Result<Self> {
        let range = descriptor.byte_range(T::KIND, file.len())?;

        let remainder = descriptor.length as usize % T::SIZE;
        if remainder != 0 {
            return Err(BspError::MisalignedLumpSize {
                lump: T::KIND,
                length: descriptor.length,
                record_size: T::SIZE,
                remainder,
            });
        }

        Ok(Self::from_records(&file[range]))
    }

    /// An empty view
    pub const fn empty() -> Self {
        Self::from_records(&[])
    }

    const fn from_records(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            _record: PhantomData,
        }
    }

    /// Number of records
    pub const fn len(&self) -> usize {
        self.bytes.len() / T::SIZE
    }

    /// Whether the view holds no records
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw bytes of the whole lump
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Raw bytes of one record
    pub fn raw(&self, index: usize) -> Option<&'a [u8]> {
        let start = index.checked_mul(T::SIZE)?;
        self.bytes.get(start..start.checked_add(T::SIZE)?)
    }

    /// Decode the record at `index`
    pub fn get(&self, index: usize) -> Result<T> {
        let raw = self.raw(index).ok_or(BspError::IndexOutOfRange {
            lump: T::KIND,
            index,
            count: self.len(),
        })?;
        T::decode(raw).map_err(|e| BspError::RecordDecode {
            lump: T::KIND,
            index,
            reason: e.to_string(),
        })
    }

    /// Sub-view of `count` records starting at `start`
    pub fn slice(&self, start: usize, count: usize) -> Result<Self> {
        let len = self.len();
        let end = start.checked_add(count).filter(|&end| end <= len);
        match end {
            Some(end) => Ok(Self::from_records(
                &self.bytes[start * T::SIZE..end * T::SIZE],
            )),
            None => Err(BspError::IndexOutOfRange {
                lump: T::KIND,
                index: start.saturating_add(count).saturating_sub(1),
                count: len,
            }),
        }
    }

    /// Sub-view covering a cross-reference run
    ///
    /// A negative first index is reported as `usize::MAX`.
    pub fn run(&self, run: RecordRun<T>) -> Result<Self> {
        let start = usize::try_from(run.first).map_err(|_| BspError::IndexOutOfRange {
            lump: T::KIND,
            index: usize::MAX,
            count: self.len(),
        })?;
        self.slice(start, run.count as usize)
    }

    /// Iterate over decoded records
    pub fn iter(&self) -> LumpIter<'a, T> {
        LumpIter {
            view: *self,
            front: 0,
            back: self.len(),
        }
    }
}

impl<T> Clone for LumpView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for LumpView<'_, T> {}

impl<T: LumpRecord> fmt::Debug for LumpView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LumpView")
            .field("lump", &T::KIND)
            .field("records", &self.len())
            .finish()
    }
}

impl<'a, T: LumpRecord> IntoIterator for LumpView<'a, T> {
    type Item = Result<T>;
    type IntoIter = LumpIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the records of a [`LumpView`]
pub struct LumpIter<'a, T> {
    view: LumpView<'a, T>,
    front: usize,
    back: usize,
}

impl<T: LumpRecord> Iterator for LumpIter<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.view.get(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: LumpRecord> DoubleEndedIterator for LumpIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.view.get(self.back))
    }
}

impl<T: LumpRecord> ExactSizeIterator for LumpIter<'_, T> {}

impl<T: LumpRecord> FusedIterator for LumpIter<'_, T> {}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lump::LumpKind;
    use crate::records::{LeafFace, Plane, Texture};

    fn leaf_face_file(faces: &[i32]) -> Vec<u8> {
        let mut data = vec![0u8; 8];
        for face in faces {
            data.extend_from_slice(&face.to_le_bytes());
        }
        data
    }

    #[test]
    fn test_view_counts_records() {
        let data = leaf_face_file(&[4, 5, 6]);
        let view = LumpView::<LeafFace>::new(&data, LumpDescriptor::new(8, 12)).unwrap();

        assert_eq!(view.len(), 3);
        assert!(!view.is_empty());
        assert_eq!(view.get(0).unwrap().face, 4);
        assert_eq!(view.get(2).unwrap().face, 6);
        assert_eq!(view.as_bytes().len(), 12);
    }

    #[test]
    fn test_view_rejects_out_of_bounds() {
        let data = leaf_face_file(&[1, 2]);
        let err = LumpView::<LeafFace>::new(&data, LumpDescriptor::new(8, 12)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LumpOutOfBounds);
        assert_eq!(err.lump(), Some(LumpKind::LeafFaces));
    }

    #[test]
    fn test_view_rejects_misaligned_length() {
        let data = vec![0u8; 8 + 70];
        let err = LumpView::<Texture>::new(&data, LumpDescriptor::new(8, 70)).unwrap_err();
        assert!(matches!(
            err,
            BspError::MisalignedLumpSize {
                lump: LumpKind::Textures,
                length: 70,
                record_size: 72,
                remainder: 70,
            }
        ));
    }

    #[test]
    fn test_bounds_checked_before_alignment() {
        let data = vec![0u8; 16];
        let err = LumpView::<Plane>::new(&data, LumpDescriptor::new(8, 17)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LumpOutOfBounds);
    }

    #[test]
    fn test_get_past_end() {
        let data = leaf_face_file(&[1]);
        let view = LumpView::<LeafFace>::new(&data, LumpDescriptor::new(8, 4)).unwrap();
        let err = view.get(1).unwrap_err();
        assert!(matches!(
            err,
            BspError::IndexOutOfRange {
                lump: LumpKind::LeafFaces,
                index: 1,
                count: 1
            }
        ));
        assert!(view.raw(usize::MAX).is_none());
    }

    #[test]
    fn test_empty_view() {
        let data = leaf_face_file(&[]);
        let view = LumpView::<LeafFace>::new(&data, LumpDescriptor::new(8, 0)).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.iter().count(), 0);
        assert!(LumpView::<Plane>::empty().is_empty());
    }

    #[test]
    fn test_slice_and_run() {
        let data = leaf_face_file(&[10, 11, 12, 13]);
        let view = LumpView::<LeafFace>::new(&data, LumpDescriptor::new(8, 16)).unwrap();

        let middle = view.slice(1, 2).unwrap();
        let faces: Vec<i32> = middle.iter().map(|f| f.unwrap().face).collect();
        assert_eq!(faces, vec![11, 12]);

        let tail = view.run(RecordRun::new(3, 1)).unwrap();
        assert_eq!(tail.get(0).unwrap().face, 13);

        assert!(view.slice(3, 2).is_err());
        assert!(view.slice(usize::MAX, 2).is_err());
        assert_eq!(view.slice(4, 0).unwrap().len(), 0);

        let err = view.run(RecordRun::new(-1, 1)).unwrap_err();
        assert!(matches!(
            err,
            BspError::IndexOutOfRange {
                index: usize::MAX,
                ..
            }
        ));
    }

    #[test]
    fn test_iter_both_ends() {
        let data = leaf_face_file(&[1, 2, 3]);
        let view = LumpView::<LeafFace>::new(&data, LumpDescriptor::new(8, 12)).unwrap();

        let mut iter = view.iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back().unwrap().unwrap().face, 3);
        assert_eq!(iter.next().unwrap().unwrap().face, 1);
        assert_eq!(iter.next().unwrap().unwrap().face, 2);
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());

        let all: Result<Vec<LeafFace>> = view.into_iter().collect();
        assert_eq!(all.unwrap().len(), 3);
    }
}
