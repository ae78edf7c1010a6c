//! A paged dynamic array that grows bucket by bucket and never relocates
//! stored values.
//!
//! This crate provides [`PagedVec`], a container addressed by non-negative
//! integer index whose storage is a sequence of fixed-size buckets. Buckets
//! are allocated lazily as higher indices are written and only ever appended,
//! so growth never copies or moves existing slots. Removal tombstones slots
//! in place with a caller-supplied fill value, and an explicit trim releases
//! fully empty buckets from the tail of the sequence.
//!
//! It is designed to back sparse, growth-heavy, removal-heavy storage - for
//! example a per-component column in an entity-oriented store - where indices
//! handed out to other parties must survive growth, and where reallocating
//! and copying the whole store on every growth step would be unacceptable.
//!
//! # Key features
//!
//! - **Stable slots**: growth appends buckets; no slot ever moves, so both
//!   indices and slot addresses stay valid across growth
//! - **Sentinel-based emptiness**: a fill value of the element type marks
//!   unused slots; there is no separate occupancy bitmap
//! - **In-place removal**: [`remove()`](PagedVec::remove) overwrites with the
//!   fill value and never deallocates
//! - **Deferred reclamation**: [`trim_excess()`](PagedVec::trim_excess)
//!   releases trailing fully empty buckets in `O(bucket_count)`, leaving
//!   surviving slots untouched
//! - **Checked and unchecked access**: `Option`-returning
//!   [`get()`](PagedVec::get) / [`get_mut()`](PagedVec::get_mut) alongside a
//!   panicking `container[index]` fast path
//! - **In-place mutation**: [`SlotMut`] guards dereference straight into the
//!   backing slot and settle the bookkeeping on drop
//!
//! # Example
//!
//! ```rust
//! use paged_vec::PagedVec;
//!
//! // 8 slots per bucket; -1 marks an empty slot.
//! let mut column = PagedVec::new(8, -1_i32);
//!
//! // Writing grows the container one bucket at a time.
//! for index in 0..128 {
//!     column.set(index, index as i32);
//! }
//! assert_eq!(column.bucket_count(), 16);
//!
//! // Remove the upper half; the buckets stay allocated...
//! for index in 64..128 {
//!     column.remove(index);
//! }
//! assert_eq!(column.bucket_count(), 16);
//!
//! // ...until an explicit trim releases the empty tail.
//! column.trim_excess();
//! assert_eq!(column.bucket_count(), 8);
//! assert_eq!(column[63], 63);
//! ```
//!
//! # Emptiness is ambiguous by design
//!
//! A slot that was never written and a slot that was removed both read back
//! as the fill value - the container cannot tell them apart and neither can
//! you. Pick a fill value that no live element ever uses.
//!
//! ```rust
//! use paged_vec::PagedVec;
//!
//! let mut column = PagedVec::new(8, -1_i32);
//! column.set(1, 10);
//! column.remove(1);
//!
//! // Slot 0 was never written; slot 1 was removed. Same answer.
//! assert_eq!(column.get(0), Some(&-1));
//! assert_eq!(column.get(1), Some(&-1));
//! ```
//!
//! # Thread safety
//!
//! [`PagedVec`] has no internal synchronization. Like any plain owned
//! collection it can move between threads and be read concurrently through
//! `&self`; concurrent mutation must be serialized by the caller, for example
//! behind a `Mutex`.

mod bucket;
mod coordinates;
mod paged_vec;
mod slot_mut;

pub(crate) use bucket::*;
pub(crate) use coordinates::*;
pub use paged_vec::PagedVec;
pub use slot_mut::SlotMut;
