use std::any::type_name;
use std::ops::Index;

use crate::{Bucket, SlotCoordinates, SlotMut};

/// A paged dynamic array addressed by non-negative integer index.
///
/// Storage is an ordered sequence of fixed-size buckets, each holding exactly
/// `bucket_size` slots. Buckets are allocated lazily as higher indices are
/// written and are only ever appended, never reordered, so growth never
/// relocates a slot: an index handed out once stays valid (and its slot stays
/// at the same address) across any number of later growth events.
///
/// Every slot holds a value of `T` at all times. A caller-supplied *fill
/// value* serves as the "empty slot" sentinel: newly allocated slots start
/// out equal to it and [`remove()`][Self::remove] resets slots back to it.
/// A slot equal to the fill value is unused by definition; there is no
/// separate occupancy bitmap, which also means a never-written slot and a
/// removed slot are deliberately indistinguishable.
///
/// Removal never deallocates. Memory is reclaimed only by an explicit call to
/// [`trim_excess()`][Self::trim_excess], which releases fully empty buckets
/// from the tail of the sequence, so interleaved write/remove traffic cannot
/// thrash the allocator.
///
/// # Access paths
///
/// * [`set()`][Self::set] / [`get()`][Self::get] /
///   [`get_mut()`][Self::get_mut] - the checked paths. `set` grows the
///   container to cover the index; the getters report out-of-range indices
///   via `None`.
/// * `container[index]` - the unchecked read fast path for indices already
///   known to be within [`capacity()`][Self::capacity]. Out-of-range access
///   panics deterministically; it is never undefined behavior and never
///   silently resolves to a different slot.
///
/// # Thread safety
///
/// The container performs no internal synchronization. It is `Send`/`Sync`
/// according to `T` like any plain owned collection: read-only shared access
/// from multiple threads is fine, any mutation requires external exclusion
/// (a `Mutex`, or a single-writer discipline enforced by `&mut` access).
///
/// # Example
///
/// ```rust
/// use paged_vec::PagedVec;
///
/// // Bucket size 8, with -1 marking empty slots.
/// let mut column = PagedVec::new(8, -1_i64);
///
/// column.set(0, 100);
/// column.set(21, 2100); // Allocates buckets up to index 21.
///
/// assert_eq!(column.capacity(), 24);
/// assert_eq!(column[0], 100);
/// assert_eq!(column.get(21), Some(&2100));
/// assert_eq!(column.get(24), None);
///
/// column.remove(21);
/// assert_eq!(column[21], -1); // Tombstoned in place.
///
/// column.trim_excess(); // Releases the now-empty trailing buckets.
/// assert_eq!(column.capacity(), 8);
/// assert_eq!(column[0], 100);
/// ```
#[derive(Clone, Debug)]
pub struct PagedVec<T> {
    /// The buckets that provide the storage of the container.
    ///
    /// The list grows by appending as higher indices are written and shrinks
    /// only when `trim_excess()` truncates empty buckets from the end. The
    /// list itself may reallocate as it grows; the slots each bucket owns
    /// never move.
    buckets: Vec<Bucket<T>>,

    /// Number of slots per bucket. Positive, fixed at construction.
    bucket_size: usize,

    /// The sentinel stamped into every newly allocated and every removed
    /// slot. Slots equal to this value are unused by definition.
    fill_value: T,
}

impl<T> PagedVec<T>
where
    T: Clone + PartialEq,
{
    /// Creates a new container with the given bucket size and fill value,
    /// holding no buckets yet.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_vec::PagedVec;
    ///
    /// let values = PagedVec::new(16, 0_u32);
    ///
    /// assert_eq!(values.capacity(), 0);
    /// assert_eq!(values.bucket_count(), 0);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `bucket_size` is zero.
    #[must_use]
    pub fn new(bucket_size: usize, fill_value: T) -> Self {
        assert!(
            bucket_size > 0,
            "PagedVec of {} must have a positive bucket size",
            type_name::<T>()
        );

        Self {
            buckets: Vec::new(),
            bucket_size,
            fill_value,
        }
    }

    /// Creates a new container and pre-allocates enough buckets to cover
    /// `capacity_hint` slots.
    ///
    /// The hint is rounded up to the nearest multiple of the bucket size: the
    /// minimum number of buckets covering it is allocated, every slot set to
    /// the fill value. A hint of zero allocates nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_vec::PagedVec;
    ///
    /// let values = PagedVec::with_capacity(8, -1_i32, 20);
    ///
    /// assert_eq!(values.bucket_count(), 3);
    /// assert_eq!(values.capacity(), 24);
    /// assert_eq!(values.get(19), Some(&-1));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `bucket_size` is zero.
    #[must_use]
    pub fn with_capacity(bucket_size: usize, fill_value: T, capacity_hint: usize) -> Self {
        let mut container = Self::new(bucket_size, fill_value);

        let required_buckets = capacity_hint.div_ceil(bucket_size);

        for _ in 0..required_buckets {
            container
                .buckets
                .push(Bucket::new(bucket_size, &container.fill_value));
        }

        container
    }

    /// The total number of addressable slots, always an exact multiple of the
    /// bucket size.
    ///
    /// Indices in `0..capacity()` are addressable; indices at or beyond it
    /// are not until a [`set()`][Self::set] or
    /// [`ensure_capacity()`][Self::ensure_capacity] grows the container.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
            .checked_mul(self.bucket_size)
            .expect("overflow here would mean the container holds more slots than virtual memory can fit - it can never grow that big")
    }

    /// The number of buckets currently allocated.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Trivial accessor, mutation tells us nothing.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// The number of slots each bucket holds, as fixed at construction.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Trivial accessor, mutation tells us nothing.
    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    /// The sentinel value that marks a slot as unused.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Trivial accessor, mutation tells us nothing.
    pub fn fill_value(&self) -> &T {
        &self.fill_value
    }

    /// The number of slots currently holding a value other than the fill
    /// value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_vec::PagedVec;
    ///
    /// let mut values = PagedVec::new(8, 0_u8);
    /// assert_eq!(values.len(), 0);
    ///
    /// values.set(3, 7);
    /// values.set(100, 9);
    /// assert_eq!(values.len(), 2);
    ///
    /// values.remove(3);
    /// assert_eq!(values.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Bucket::len).sum()
    }

    /// Whether every allocated slot holds the fill value.
    ///
    /// An empty container may still be holding unused capacity; only
    /// [`trim_excess()`][Self::trim_excess] releases it.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Bucket::is_empty)
    }

    /// Grows the container until `capacity() > index`, by appending new
    /// fill-initialized buckets to the end of the bucket sequence.
    ///
    /// Existing buckets are never removed, reordered or touched, so every
    /// previously valid index - and the address of its slot - remains valid
    /// across the call. Calling this with an already-covered index is a
    /// no-op.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_vec::PagedVec;
    ///
    /// let mut values = PagedVec::new(8, 0_u32);
    ///
    /// values.ensure_capacity(8);
    /// assert_eq!(values.capacity(), 16);
    ///
    /// // Already covered - nothing happens.
    /// values.ensure_capacity(3);
    /// assert_eq!(values.capacity(), 16);
    /// ```
    pub fn ensure_capacity(&mut self, index: usize) {
        let required_buckets = index
            .checked_add(1)
            .expect("slot index cannot be usize::MAX - that many slots cannot exist in virtual memory")
            .div_ceil(self.bucket_size);

        while self.buckets.len() < required_buckets {
            self.buckets
                .push(Bucket::new(self.bucket_size, &self.fill_value));
        }
    }

    /// Stores `value` at `index`, growing the container to cover the index
    /// if needed.
    ///
    /// This always succeeds for any index (it may allocate buckets). Storing
    /// the fill value itself is permitted and marks the slot unused.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_vec::PagedVec;
    ///
    /// let mut values = PagedVec::new(8, 0_u32);
    ///
    /// values.set(12, 120);
    ///
    /// assert_eq!(values.capacity(), 16);
    /// assert_eq!(values[12], 120);
    /// ```
    pub fn set(&mut self, index: usize, value: T) {
        self.ensure_capacity(index);

        let coordinates = SlotCoordinates::from_index(index, self.bucket_size);

        let Self {
            buckets,
            fill_value,
            ..
        } = self;

        buckets
            .get_mut(coordinates.bucket_index())
            .expect("ensure_capacity() guarantees the target bucket exists")
            .set(coordinates.offset(), value, fill_value);
    }

    /// Returns a reference to the slot at `index`, or `None` if the index is
    /// at or beyond the current capacity.
    ///
    /// This is the bounds-checked read path. Note that `Some(&fill_value)`
    /// is a perfectly possible result: a slot that was never written, or was
    /// removed, still exists and holds the fill value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_vec::PagedVec;
    ///
    /// let mut values = PagedVec::new(8, -1_i32);
    /// values.set(2, 20);
    ///
    /// assert_eq!(values.get(2), Some(&20));
    /// assert_eq!(values.get(5), Some(&-1)); // Allocated but never written.
    /// assert_eq!(values.get(8), None); // Beyond capacity.
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        let coordinates = SlotCoordinates::from_index(index, self.bucket_size);

        self.buckets
            .get(coordinates.bucket_index())
            .map(|bucket| bucket.slot(coordinates.offset()))
    }

    /// Returns a scoped exclusive guard over the slot at `index`, or `None`
    /// if the index is at or beyond the current capacity.
    ///
    /// The guard dereferences straight into the backing slot, enabling
    /// in-place mutation without a second index resolution. When it is
    /// dropped, the container's bookkeeping is settled against whatever was
    /// written - including writes of the fill value, which mark the slot
    /// unused.
    ///
    /// This never grows the container; use [`set()`][Self::set] to write
    /// beyond the current capacity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_vec::PagedVec;
    ///
    /// let mut values = PagedVec::new(8, 0_u64);
    /// values.set(4, 400);
    ///
    /// if let Some(mut slot) = values.get_mut(4) {
    ///     *slot += 4;
    /// }
    ///
    /// assert_eq!(values[4], 404);
    /// assert!(values.get_mut(8).is_none());
    /// ```
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<SlotMut<'_, T>> {
        let coordinates = SlotCoordinates::from_index(index, self.bucket_size);

        let Self {
            buckets,
            fill_value,
            ..
        } = self;
        let fill_value: &T = fill_value;

        buckets
            .get_mut(coordinates.bucket_index())
            .map(|bucket| SlotMut::new(bucket, coordinates.offset(), fill_value))
    }

    /// Resets the slot at `index` to the fill value, tombstoning it in place.
    ///
    /// The slot's bucket is never deallocated here, no matter how empty it
    /// becomes - reclamation is deferred entirely to
    /// [`trim_excess()`][Self::trim_excess] so that interleaved write/remove
    /// traffic does not thrash the allocator. Removing an index at or beyond
    /// the current capacity is a no-op: such a slot is already absent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_vec::PagedVec;
    ///
    /// let mut values = PagedVec::new(8, -1_i32);
    /// values.set(2, 20);
    ///
    /// values.remove(2);
    /// assert_eq!(values[2], -1);
    /// assert_eq!(values.bucket_count(), 1); // Still allocated.
    ///
    /// values.remove(1000); // Out of range - nothing happens.
    /// ```
    pub fn remove(&mut self, index: usize) {
        let coordinates = SlotCoordinates::from_index(index, self.bucket_size);

        let Self {
            buckets,
            fill_value,
            ..
        } = self;

        if let Some(bucket) = buckets.get_mut(coordinates.bucket_index()) {
            bucket.clear(coordinates.offset(), fill_value);
        }
    }

    /// Releases every fully empty bucket at the end of the bucket sequence,
    /// shrinking the capacity accordingly.
    ///
    /// The scan runs backward from the last bucket to the highest-indexed
    /// bucket still holding a non-fill value; everything after that bucket is
    /// dropped. If every bucket is empty the bucket count drops to zero - no
    /// reserve bucket is kept. Runs in `O(bucket_count)` thanks to the
    /// per-bucket live counts.
    ///
    /// Retained buckets are not touched, reallocated or renumbered: any index
    /// within the new, smaller capacity reads the same value (from the same
    /// address) as before the trim. Interior empty buckets below the highest
    /// live one are retained, since releasing them would renumber slots.
    ///
    /// # Example
    ///
    /// ```rust
    /// use paged_vec::PagedVec;
    ///
    /// let mut values = PagedVec::new(8, -1_i32);
    /// values.set(70, 1);
    /// assert_eq!(values.bucket_count(), 9);
    ///
    /// values.remove(70);
    /// values.trim_excess();
    /// assert_eq!(values.bucket_count(), 0);
    /// ```
    pub fn trim_excess(&mut self) {
        // Find the last non-empty bucket by scanning from the end.
        let new_len = self
            .buckets
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, bucket)| {
                if bucket.is_empty() {
                    None
                } else {
                    Some(index.checked_add(1).expect("bucket index cannot overflow"))
                }
            })
            .unwrap_or(0);

        self.buckets.truncate(new_len);
    }
}

impl<T> Index<usize> for PagedVec<T>
where
    T: Clone + PartialEq,
{
    type Output = T;

    /// The unchecked read fast path, for indices already known to be within
    /// [`capacity()`][Self::capacity].
    ///
    /// There is no `IndexMut` counterpart: a raw `&mut` handed out by the
    /// index operator would bypass the live-slot accounting that
    /// [`trim_excess()`][Self::trim_excess] relies on. Mutation goes through
    /// [`set()`][Self::set] and [`get_mut()`][Self::get_mut].
    ///
    /// # Panics
    ///
    /// Panics if the index is at or beyond the current capacity. The panic is
    /// deterministic; out-of-range access is never undefined behavior and
    /// never resolves to a different slot.
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).unwrap_or_else(|| {
            panic!(
                "index {index} is beyond the capacity of this PagedVec of {}",
                type_name::<T>()
            )
        })
    }
}
