use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::Bucket;

/// Scoped exclusive access to a single slot of a [`PagedVec`][crate::PagedVec].
///
/// Returned by [`PagedVec::get_mut()`][crate::PagedVec::get_mut], this guard
/// dereferences directly into the backing slot, so values can be mutated in
/// place without a second index resolution. While the guard is alive it
/// borrows the container exclusively.
///
/// Writing through the guard may change whether the slot counts as in use:
/// storing the container's fill value marks the slot unused, storing anything
/// else marks it used. The guard settles that bookkeeping with the owning
/// bucket when it is dropped, which keeps the container's item count and its
/// trimming decisions exact no matter what was written.
///
/// # Example
///
/// ```rust
/// use paged_vec::PagedVec;
///
/// let mut values = PagedVec::new(8, 0_u64);
/// values.set(3, 40);
///
/// if let Some(mut slot) = values.get_mut(3) {
///     *slot += 2;
/// }
///
/// assert_eq!(values[3], 42);
/// ```
pub struct SlotMut<'v, T>
where
    T: Clone + PartialEq,
{
    bucket: &'v mut Bucket<T>,
    offset: usize,
    fill_value: &'v T,

    /// Liveness of the slot at the time the guard was created. Compared
    /// against the final contents on drop to adjust the bucket's live count.
    was_live: bool,
}

impl<'v, T> SlotMut<'v, T>
where
    T: Clone + PartialEq,
{
    #[must_use]
    pub(crate) fn new(bucket: &'v mut Bucket<T>, offset: usize, fill_value: &'v T) -> Self {
        let was_live = bucket.is_live(offset, fill_value);

        Self {
            bucket,
            offset,
            fill_value,
            was_live,
        }
    }
}

impl<T> Deref for SlotMut<'_, T>
where
    T: Clone + PartialEq,
{
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.bucket.slot(self.offset)
    }
}

impl<T> DerefMut for SlotMut<'_, T>
where
    T: Clone + PartialEq,
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.bucket.slot_mut(self.offset)
    }
}

impl<T> Drop for SlotMut<'_, T>
where
    T: Clone + PartialEq,
{
    fn drop(&mut self) {
        self.bucket
            .reconcile_live(self.offset, self.was_live, self.fill_value);
    }
}

impl<T> fmt::Debug for SlotMut<'_, T>
where
    T: Clone + PartialEq + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotMut")
            .field("offset", &self.offset)
            .field("value", &**self)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: i32 = -1;

    #[test]
    fn writing_value_makes_slot_live() {
        let mut bucket = Bucket::new(4, &FILL);

        {
            let mut slot = SlotMut::new(&mut bucket, 1, &FILL);
            *slot = 42;
        }

        assert_eq!(bucket.len(), 1);
        assert_eq!(*bucket.slot(1), 42);
    }

    #[test]
    fn writing_fill_value_makes_slot_unused() {
        let mut bucket = Bucket::new(4, &FILL);
        bucket.set(1, 42, &FILL);

        {
            let mut slot = SlotMut::new(&mut bucket, 1, &FILL);
            *slot = FILL;
        }

        assert!(bucket.is_empty());
    }

    #[test]
    fn read_only_access_changes_nothing() {
        let mut bucket = Bucket::new(4, &FILL);
        bucket.set(2, 7, &FILL);

        {
            let slot = SlotMut::new(&mut bucket, 2, &FILL);
            assert_eq!(*slot, 7);
        }

        assert_eq!(bucket.len(), 1);
    }

    #[test]
    fn overwrite_live_with_live_is_count_neutral() {
        let mut bucket = Bucket::new(4, &FILL);
        bucket.set(0, 1, &FILL);

        {
            let mut slot = SlotMut::new(&mut bucket, 0, &FILL);
            *slot = 2;
        }

        assert_eq!(bucket.len(), 1);
        assert_eq!(*bucket.slot(0), 2);
    }
}
