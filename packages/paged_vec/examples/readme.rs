//! Example that demonstrates the exact usage shown in the README.md file.
//!
//! This shows how to use `PagedVec` as a sparse, growth-heavy value column.

use paged_vec::PagedVec;

fn main() {
    println!("=== Paged Vec README Example ===");

    // 8 slots per bucket, with -1 marking empty slots.
    let mut column = PagedVec::new(8, -1_i64);

    // Writing at any index grows the container bucket by bucket.
    column.set(3, 300);
    column.set(64, 6400);

    println!(
        "Capacity {} across {} buckets",
        column.capacity(),
        column.bucket_count()
    );

    // Reading a known-valid index is as direct as array indexing.
    println!("Value at 3: {}", column[3]);

    // Removal tombstones in place; trim releases the empty tail buckets.
    column.remove(64);
    column.trim_excess();

    println!(
        "After trim: capacity {} across {} buckets",
        column.capacity(),
        column.bucket_count()
    );
    println!("Value at 3 is untouched: {}", column[3]);

    println!("README example completed successfully!");
}
