/*!
 * Memory Image
 * Flat, fixed-size word array shared by every process
 */

use super::types::{MemoryError, MemoryResult, MemoryStats, Region};
use crate::core::limits::SENTINEL;
use crate::core::types::{Address, Size, Word};
use tracing::{debug, error};

/// The sole storage substrate of the machine.
///
/// Cells start at [`SENTINEL`]. Regions are handed out by a bump allocator in
/// request order and are never freed during a run.
#[derive(Debug, Clone)]
pub struct MemoryImage {
    cells: Vec<Word>,
    next_free: Address,
    allocated_regions: usize,
}

impl MemoryImage {
    pub fn new(size: Size) -> Self {
        Self {
            cells: vec![SENTINEL; size],
            next_free: 0,
            allocated_regions: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> Size {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells not yet handed out by the allocator
    #[inline]
    pub fn available(&self) -> Size {
        self.cells.len() - self.next_free
    }

    /// Reserve the next `size` cells. Contents stay untouched (sentinel).
    pub fn allocate(&mut self, size: Size) -> MemoryResult<Region> {
        let available = self.available();
        if size > available {
            error!(
                "OOM: requested {} cells, only {} available ({} used / {} total)",
                size,
                available,
                self.next_free,
                self.cells.len()
            );
            return Err(MemoryError::OutOfMemory {
                requested: size,
                available,
                used: self.next_free,
                total: self.cells.len(),
            });
        }

        let region = Region::new(self.next_free, size);
        self.next_free += size;
        self.allocated_regions += 1;
        debug!(base = region.base, size, "region allocated");
        Ok(region)
    }

    pub fn read(&self, address: Address) -> MemoryResult<Word> {
        self.cells
            .get(address)
            .copied()
            .ok_or(MemoryError::InvalidAddress {
                address,
                size: self.cells.len(),
            })
    }

    pub fn write(&mut self, address: Address, value: Word) -> MemoryResult<()> {
        let size = self.cells.len();
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(MemoryError::InvalidAddress { address, size })?;
        *cell = value;
        Ok(())
    }

    pub fn read_block(&self, start: Address, end: Address) -> MemoryResult<&[Word]> {
        if start > end || end > self.cells.len() {
            return Err(MemoryError::InvalidRange {
                start,
                end,
                size: self.cells.len(),
            });
        }
        Ok(&self.cells[start..end])
    }

    pub fn write_block(&mut self, start: Address, data: &[Word]) -> MemoryResult<()> {
        let end = start + data.len();
        if end > self.cells.len() {
            return Err(MemoryError::InvalidRange {
                start,
                end,
                size: self.cells.len(),
            });
        }
        self.cells[start..end].copy_from_slice(data);
        Ok(())
    }

    /// Every cell as `(index, value)`, in address order
    pub fn dump(&self) -> impl Iterator<Item = (Address, Word)> + '_ {
        self.cells.iter().copied().enumerate()
    }

    /// Owned copy of the whole image
    pub fn snapshot(&self) -> Vec<Word> {
        self.cells.clone()
    }

    pub fn stats(&self) -> MemoryStats {
        let total = self.cells.len();
        let used = self.next_free;
        MemoryStats {
            total_memory: total,
            used_memory: used,
            available_memory: total - used,
            usage_percentage: if total == 0 {
                0.0
            } else {
                (used as f64 / total as f64) * 100.0
            },
            allocated_regions: self.allocated_regions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_is_sentinel_filled() {
        let memory = MemoryImage::new(8);
        assert_eq!(memory.len(), 8);
        assert!(memory.dump().all(|(_, value)| value == SENTINEL));
    }

    #[test]
    fn test_read_write() {
        let mut memory = MemoryImage::new(8);
        memory.write(3, 42).unwrap();
        assert_eq!(memory.read(3).unwrap(), 42);
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut memory = MemoryImage::new(8);
        assert_eq!(
            memory.read(8),
            Err(MemoryError::InvalidAddress {
                address: 8,
                size: 8
            })
        );
        assert!(memory.write(100, 1).is_err());
    }

    #[test]
    fn test_block_operations() {
        let mut memory = MemoryImage::new(8);
        memory.write_block(2, &[1, 2, 3]).unwrap();
        assert_eq!(memory.read_block(2, 5).unwrap(), &[1, 2, 3]);
        assert!(memory.write_block(6, &[1, 2, 3]).is_err());
        assert!(memory.read_block(5, 2).is_err());
    }

    #[test]
    fn test_bump_allocation() {
        let mut memory = MemoryImage::new(30);
        let first = memory.allocate(12).unwrap();
        let second = memory.allocate(10).unwrap();

        assert_eq!(first, Region::new(0, 12));
        assert_eq!(second, Region::new(12, 10));
        assert_eq!(memory.available(), 8);
    }

    #[test]
    fn test_allocation_failure_leaves_state_untouched() {
        let mut memory = MemoryImage::new(20);
        memory.allocate(15).unwrap();

        let err = memory.allocate(6).unwrap_err();
        assert_eq!(
            err,
            MemoryError::OutOfMemory {
                requested: 6,
                available: 5,
                used: 15,
                total: 20
            }
        );

        // A smaller request still fits afterwards
        assert_eq!(memory.allocate(5).unwrap(), Region::new(15, 5));
    }

    #[test]
    fn test_stats() {
        let mut memory = MemoryImage::new(200);
        memory.allocate(50).unwrap();
        let stats = memory.stats();
        assert_eq!(stats.used_memory, 50);
        assert_eq!(stats.available_memory, 150);
        assert_eq!(stats.allocated_regions, 1);
        assert!((stats.usage_percentage - 25.0).abs() < f64::EPSILON);
    }
}
