use num_integer::Integer;

/// Internal coordinates for locating a slot within the bucket sequence.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SlotCoordinates {
    /// The index of the bucket containing this slot.
    bucket_index: usize,
    /// The offset within the bucket where this slot is stored.
    offset: usize,
}

impl SlotCoordinates {
    /// Splits a linear slot index into bucket coordinates.
    ///
    /// This is a pure translation - it says nothing about whether the bucket
    /// in question has been allocated.
    #[must_use]
    pub(crate) fn from_index(index: usize, bucket_size: usize) -> Self {
        debug_assert!(bucket_size > 0, "bucket size must be positive");

        let (bucket_index, offset) = index.div_rem(&bucket_size);

        Self {
            bucket_index,
            offset,
        }
    }

    /// Returns the index of the bucket containing this slot.
    #[must_use]
    pub(crate) fn bucket_index(&self) -> usize {
        self.bucket_index
    }

    /// Returns the offset within the bucket where this slot is stored.
    #[must_use]
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }
}
