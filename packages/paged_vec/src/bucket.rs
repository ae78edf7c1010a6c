use std::any::type_name;

/// This is the backing storage of a `PagedVec`. It is an implementation detail.
///
/// A fixed-size contiguous segment of slots. Every slot starts out holding the
/// container's fill value and a slot is defined to be in use exactly when its
/// value differs from the fill value - there is no separate occupancy bitmap.
///
/// The slots live in a boxed slice, so they keep their addresses for the whole
/// lifetime of the bucket. The container may move the bucket *handle* around
/// (e.g. when its bucket list grows) but the slots themselves never move.
///
/// The bucket maintains an exact count of in-use slots. Every mutation path
/// must keep this count accurate because the container relies on it both for
/// its item count and to decide, in constant time per bucket, whether a bucket
/// can be released during trimming. Callers that write through a raw slot
/// reference obtained from [`slot_mut()`][Self::slot_mut] are required to
/// follow up with [`reconcile_live()`][Self::reconcile_live].
#[derive(Clone, Debug)]
pub(crate) struct Bucket<T> {
    /// Exactly `bucket_size` slots, each created equal to the fill value.
    slots: Box<[T]>,

    /// Number of slots whose value currently differs from the fill value.
    live: usize,
}

impl<T> Bucket<T>
where
    T: Clone + PartialEq,
{
    /// Creates a new bucket with every slot set to the fill value.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_size` is zero.
    #[must_use]
    pub(crate) fn new(bucket_size: usize, fill_value: &T) -> Self {
        assert!(
            bucket_size > 0,
            "cannot create a zero-sized bucket of {}",
            type_name::<T>()
        );

        Self {
            slots: vec![fill_value.clone(); bucket_size].into_boxed_slice(),
            live: 0,
        }
    }

    /// The number of slots whose value differs from the fill value.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Trivial accessor, mutation tells us nothing.
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Whether every slot in this bucket holds the fill value.
    ///
    /// A fully empty bucket is a candidate for release during trimming.
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Returns a shared reference to the slot at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if the offset is out of bounds.
    #[must_use]
    pub(crate) fn slot(&self, offset: usize) -> &T {
        self.slots.get(offset).unwrap_or_else(|| {
            panic!(
                "slot offset {offset} out of bounds in bucket of {}",
                type_name::<T>()
            )
        })
    }

    /// Returns an exclusive reference to the slot at `offset` without any
    /// live-count accounting.
    ///
    /// The caller must call [`reconcile_live()`][Self::reconcile_live] once it
    /// is done writing through the reference, otherwise the live count goes
    /// stale and trimming may release a bucket that still holds data.
    ///
    /// # Panics
    ///
    /// Panics if the offset is out of bounds.
    #[must_use]
    pub(crate) fn slot_mut(&mut self, offset: usize) -> &mut T {
        self.slots.get_mut(offset).unwrap_or_else(|| {
            panic!(
                "slot offset {offset} out of bounds in bucket of {}",
                type_name::<T>()
            )
        })
    }

    /// Whether the slot at `offset` currently differs from the fill value.
    ///
    /// # Panics
    ///
    /// Panics if the offset is out of bounds.
    #[must_use]
    pub(crate) fn is_live(&self, offset: usize, fill_value: &T) -> bool {
        *self.slot(offset) != *fill_value
    }

    /// Stores `value` into the slot at `offset`, keeping the live count exact.
    ///
    /// Storing the fill value itself is permitted and marks the slot unused,
    /// consistent with the rule that fill-valued slots are empty by definition.
    ///
    /// # Panics
    ///
    /// Panics if the offset is out of bounds.
    pub(crate) fn set(&mut self, offset: usize, value: T, fill_value: &T) {
        let was_live = self.is_live(offset, fill_value);
        let is_live = value != *fill_value;

        *self.slot_mut(offset) = value;

        self.reconcile_transition(was_live, is_live);
    }

    /// Resets the slot at `offset` to the fill value, keeping the live count
    /// exact. Clearing an already-empty slot is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the offset is out of bounds.
    pub(crate) fn clear(&mut self, offset: usize, fill_value: &T) {
        if !self.is_live(offset, fill_value) {
            return;
        }

        self.slot_mut(offset).clone_from(fill_value);

        self.live = self
            .live
            .checked_sub(1)
            .expect("slot was live, so the live count must be non-zero");
    }

    /// Brings the live count back in sync after a caller wrote through a raw
    /// slot reference.
    ///
    /// `was_live` is the liveness of the slot before the caller obtained the
    /// reference; the current slot contents supply the other half.
    ///
    /// # Panics
    ///
    /// Panics if the offset is out of bounds.
    pub(crate) fn reconcile_live(&mut self, offset: usize, was_live: bool, fill_value: &T) {
        let is_live = self.is_live(offset, fill_value);

        self.reconcile_transition(was_live, is_live);
    }

    fn reconcile_transition(&mut self, was_live: bool, is_live: bool) {
        match (was_live, is_live) {
            (false, true) => {
                self.live = self
                    .live
                    .checked_add(1)
                    .expect("live count is bounded by bucket size, which fits in usize");
            }
            (true, false) => {
                self.live = self
                    .live
                    .checked_sub(1)
                    .expect("slot was live, so the live count must be non-zero");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: i32 = -1;

    #[test]
    fn new_bucket_is_all_fill() {
        let bucket = Bucket::new(4, &FILL);

        assert!(bucket.is_empty());
        assert_eq!(bucket.len(), 0);

        for offset in 0..4 {
            assert_eq!(*bucket.slot(offset), FILL);
        }
    }

    #[test]
    fn set_and_clear_track_live_count() {
        let mut bucket = Bucket::new(4, &FILL);

        bucket.set(0, 10, &FILL);
        bucket.set(2, 20, &FILL);

        assert_eq!(bucket.len(), 2);
        assert!(!bucket.is_empty());

        // Overwriting a live slot with another live value is count-neutral.
        bucket.set(0, 11, &FILL);
        assert_eq!(bucket.len(), 2);

        bucket.clear(0, &FILL);
        assert_eq!(bucket.len(), 1);
        assert_eq!(*bucket.slot(0), FILL);

        bucket.clear(2, &FILL);
        assert!(bucket.is_empty());
    }

    #[test]
    fn clear_empty_slot_is_noop() {
        let mut bucket = Bucket::new(4, &FILL);

        bucket.clear(1, &FILL);

        assert!(bucket.is_empty());
        assert_eq!(*bucket.slot(1), FILL);
    }

    #[test]
    fn set_fill_value_marks_slot_unused() {
        let mut bucket = Bucket::new(4, &FILL);

        bucket.set(3, 30, &FILL);
        assert_eq!(bucket.len(), 1);

        bucket.set(3, FILL, &FILL);
        assert!(bucket.is_empty());
    }

    #[test]
    fn reconcile_after_raw_write() {
        let mut bucket = Bucket::new(4, &FILL);

        let was_live = bucket.is_live(1, &FILL);
        *bucket.slot_mut(1) = 42;
        bucket.reconcile_live(1, was_live, &FILL);

        assert_eq!(bucket.len(), 1);

        let was_live = bucket.is_live(1, &FILL);
        *bucket.slot_mut(1) = FILL;
        bucket.reconcile_live(1, was_live, &FILL);

        assert!(bucket.is_empty());
    }

    #[test]
    #[should_panic]
    fn slot_out_of_bounds_panics() {
        let bucket = Bucket::new(4, &FILL);

        _ = bucket.slot(4);
    }

    #[test]
    #[should_panic]
    fn zero_size_is_panic() {
        drop(Bucket::new(0, &FILL));
    }
}
