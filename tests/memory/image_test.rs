/*!
 * Memory Image Tests
 * Allocation, bounds checking and dumps of the flat image
 */

use pretty_assertions::assert_eq;
use sim_kernel::memory::{MemoryError, MemoryImage, Region};

#[test]
fn test_image_starts_sentinel_filled() {
    let image = MemoryImage::new(16);

    assert_eq!(image.len(), 16);
    assert_eq!(image.available(), 16);
    assert!(image.dump().all(|(_, value)| value == -1));
}

#[test]
fn test_bump_allocation_is_contiguous() {
    let mut image = MemoryImage::new(100);

    let first = image.allocate(20).unwrap();
    let second = image.allocate(35).unwrap();

    assert_eq!(first, Region::new(0, 20));
    assert_eq!(second, Region::new(20, 35));
    assert_eq!(second.base, first.end());
    assert_eq!(image.available(), 45);
}

#[test]
fn test_out_of_memory_leaves_allocator_unchanged() {
    let mut image = MemoryImage::new(30);
    image.allocate(25).unwrap();

    let err = image.allocate(6).unwrap_err();
    assert_eq!(
        err,
        MemoryError::OutOfMemory {
            requested: 6,
            available: 5,
            used: 25,
            total: 30,
        }
    );

    // A smaller request still fits after the failure
    assert_eq!(image.allocate(5).unwrap(), Region::new(25, 5));
    assert_eq!(image.available(), 0);
}

#[test]
fn test_bounds_checked_access() {
    let mut image = MemoryImage::new(4);

    image.write(3, 42).unwrap();
    assert_eq!(image.read(3).unwrap(), 42);
    assert_eq!(
        image.read(4),
        Err(MemoryError::InvalidAddress {
            address: 4,
            size: 4
        })
    );
    assert!(image.write(10, 1).is_err());
    assert!(image.write_block(2, &[1, 2, 3]).is_err());
    assert!(image.read_block(3, 2).is_err());
}

#[test]
fn test_block_round_trip_and_dump() {
    let mut image = MemoryImage::new(6);
    image.write_block(1, &[7, 8, 9]).unwrap();

    assert_eq!(image.read_block(1, 4).unwrap(), &[7, 8, 9]);
    assert_eq!(
        image.dump().collect::<Vec<_>>(),
        vec![(0, -1), (1, 7), (2, 8), (3, 9), (4, -1), (5, -1)]
    );
}

#[test]
fn test_stats_track_allocator() {
    let mut image = MemoryImage::new(200);
    image.allocate(50).unwrap();

    let stats = image.stats();
    assert_eq!(stats.total_memory, 200);
    assert_eq!(stats.used_memory, 50);
    assert_eq!(stats.available_memory, 150);
    assert_eq!(stats.allocated_regions, 1);
    assert!((stats.usage_percentage - 25.0).abs() < f64::EPSILON);
}
