//! Basic usage of the `paged_vec` crate:
//!
//! * Creating a container.
//! * Writing values at arbitrary indices.
//! * Reading values back.
//! * Removing values and reclaiming memory.

use paged_vec::PagedVec;

fn main() {
    // 8 slots per bucket; an empty string marks an empty slot.
    let mut names = PagedVec::new(8, String::new());

    // Writing at an index allocates however many buckets are needed to
    // cover it. Indices you have already handed out stay valid forever.
    names.set(0, "Alice".to_string());
    names.set(1, "Bob".to_string());
    names.set(40, "Zainab".to_string());

    println!(
        "Container holds {} values across {} buckets ({} slots of capacity)",
        names.len(),
        names.bucket_count(),
        names.capacity()
    );

    // Reading a known-valid index is fast, just like `Vec[index]`.
    println!("Slot 0: {}", names[0]);

    // The checked path reports out-of-range indices instead of panicking.
    match names.get(1000) {
        Some(value) => println!("Slot 1000: {value}"),
        None => println!("Slot 1000 is beyond the current capacity"),
    }

    // You can also modify values in-place.
    if let Some(mut slot) = names.get_mut(0) {
        slot.push_str(" Smith");
    }
    println!("Slot 0 after modification: {}", names[0]);

    // Removal tombstones the slot; memory stays allocated.
    names.remove(40);
    println!(
        "After removal: {} values, still {} buckets",
        names.len(),
        names.bucket_count()
    );

    // An explicit trim releases the fully empty buckets at the tail.
    names.trim_excess();
    println!(
        "After trim: {} buckets ({} slots of capacity)",
        names.bucket_count(),
        names.capacity()
    );
}
