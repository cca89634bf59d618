//! Set-Associative Write-Back Cache.
//!
//! This module implements the data-carrying cache placed in front of the flat
//! memory store. Two independent instances serve the pipeline: the
//! instruction cache (fetch stage) and the data cache (memory stage). The
//! cache models:
//! 1. **Organization:** Direct-mapped or two-way set-associative geometry.
//! 2. **Policies:** Write-back, write-allocate, LRU replacement by monotonic timestamp.
//! 3. **Timing:** A HIT/MISS indication per access; the miss penalty in cycles
//!    is reported separately by [`Cache::penalty`] and turned into pipeline
//!    stalls by the fetch and memory stages.
//!
//! Every access that misses refills the block immediately at the data level;
//! the stall cycles are pure accounting on top.

use crate::common::data::MemSize;
use crate::common::error::SimError;
use crate::config::CacheConfig;
use crate::mem::MemoryStore;

/// Result of a cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// The block was resident.
    Hit,
    /// The block had to be fetched from memory.
    Miss,
}

/// One cache block: metadata plus `block_size` bytes of data.
#[derive(Clone, Debug)]
struct Block {
    tag: u32,
    /// Monotonic use timestamp; the smallest value in a full set is the LRU victim.
    last_used: u64,
    valid: bool,
    dirty: bool,
    data: Vec<u8>,
}

impl Block {
    fn new(block_size: u32) -> Self {
        Self {
            tag: 0,
            last_used: 0,
            valid: false,
            dirty: false,
            data: vec![0; block_size as usize],
        }
    }
}

/// Set-associative write-back cache with LRU replacement.
///
/// Parameterized by capacity, block size, organization (1 or 2 ways), and
/// miss latency. Organized as `cache_size / (block_size * ways)` sets.
#[derive(Debug)]
pub struct Cache {
    sets: Vec<Vec<Block>>,
    ways: u32,
    block_size: u32,
    offset_bits: u32,
    index_bits: u32,
    tag_bits: u32,
    miss_latency: u32,
    use_counter: u64,
    hits: u64,
    misses: u64,
}

impl Cache {
    /// Creates a new cache from the given configuration.
    ///
    /// The configuration must already be validated (see
    /// [`CacheConfig::validate`]); geometry is derived as
    /// `entries = cache_size / (block_size * ways)` with the address split
    /// into offset, index, and tag fields.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache capacity, block size, organization, and miss latency.
    pub fn new(config: &CacheConfig) -> Self {
        let ways = config.kind.ways();
        let entries = config.cache_size / (config.block_size * ways);
        let offset_bits = config.block_size.trailing_zeros();
        let index_bits = entries.trailing_zeros();

        let mut sets = Vec::with_capacity(entries as usize);
        for _ in 0..entries {
            let mut set = Vec::with_capacity(ways as usize);
            for _ in 0..ways {
                set.push(Block::new(config.block_size));
            }
            sets.push(set);
        }

        Self {
            sets,
            ways,
            block_size: config.block_size,
            offset_bits,
            index_bits,
            tag_bits: u32::BITS - offset_bits - index_bits,
            miss_latency: config.miss_latency,
            use_counter: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the miss penalty in cycles. Zero disables miss stalling.
    #[inline]
    pub fn penalty(&self) -> u32 {
        self.miss_latency
    }

    /// Returns the number of accesses that hit.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Returns the number of accesses that missed.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Reads a value of the given size from the cache.
    ///
    /// On a hit the block's LRU timestamp is refreshed. On a miss a victim is
    /// selected (first invalid way, else smallest timestamp), written back if
    /// dirty, and the block is refilled from memory before the value is
    /// assembled.
    ///
    /// Accesses are assumed not to cross a block boundary (naturally aligned
    /// loads never do).
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address of the most-significant byte of the value.
    /// * `size` - Access width; the bytes are assembled big-endian.
    /// * `mem` - Backing store used for write-back and refill.
    ///
    /// # Returns
    ///
    /// The zero-extended value and the HIT/MISS status of the access.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::MemoryRange`] from the backing store.
    pub fn read(
        &mut self,
        addr: u32,
        size: MemSize,
        mem: &mut MemoryStore,
    ) -> Result<(u32, Access), SimError> {
        let (status, way) = self.lookup_or_fill(addr, mem)?;
        let index = self.index_of(addr) as usize;
        let offset = self.offset_of(addr) as usize;

        let mut value = 0u32;
        for j in 0..size.bytes() as usize {
            value = (value << 8) | u32::from(self.sets[index][way].data[offset + j]);
        }
        Ok((value, status))
    }

    /// Writes the low-order `size` bytes of `value` into the cache.
    ///
    /// Write-allocate: on a miss the block is first brought in from memory,
    /// then modified. The block is marked dirty either way; memory is only
    /// updated when the block is evicted or drained.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address of the most-significant byte of the value.
    /// * `value` - The value; bytes above the access width are ignored.
    /// * `size` - Access width; bytes are stored big-endian.
    /// * `mem` - Backing store used for write-back and refill.
    ///
    /// # Returns
    ///
    /// The HIT/MISS status of the access.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::MemoryRange`] from the backing store.
    pub fn write(
        &mut self,
        addr: u32,
        value: u32,
        size: MemSize,
        mem: &mut MemoryStore,
    ) -> Result<Access, SimError> {
        let (status, way) = self.lookup_or_fill(addr, mem)?;
        let index = self.index_of(addr) as usize;
        let offset = self.offset_of(addr) as usize;

        let n = size.bytes();
        for j in 0..n {
            let shift = 8 * (n - 1 - j);
            self.sets[index][way].data[(offset as u32 + j) as usize] = (value >> shift) as u8;
        }
        self.sets[index][way].dirty = true;
        Ok(status)
    }

    /// Probes whether the block containing `addr` is resident.
    ///
    /// Does not touch LRU state or counters; intended for tests and
    /// diagnostics.
    pub fn contains(&self, addr: u32) -> bool {
        let tag = self.tag_of(addr);
        let index = self.index_of(addr) as usize;
        self.sets[index]
            .iter()
            .any(|b| b.valid && b.tag == tag)
    }

    /// Flushes every valid and dirty block to memory.
    ///
    /// Invoked once at shutdown so committed stores become visible in the
    /// backing store. Block metadata is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::MemoryRange`] from the backing store.
    pub fn drain(&mut self, mem: &mut MemoryStore) -> Result<(), SimError> {
        for index in 0..self.sets.len() {
            for way in 0..self.ways as usize {
                if !self.sets[index][way].valid || !self.sets[index][way].dirty {
                    continue;
                }
                let base = self.block_addr(self.sets[index][way].tag, index as u32);
                for k in 0..self.block_size {
                    let byte = self.sets[index][way].data[k as usize];
                    mem.set(base + k, MemSize::Byte, u32::from(byte))?;
                }
            }
        }
        Ok(())
    }

    /// Finds the block for `addr`, refilling on a miss.
    ///
    /// Returns the HIT/MISS status and the way holding the block. The hit
    /// and miss counters and the LRU timestamp are updated here.
    fn lookup_or_fill(
        &mut self,
        addr: u32,
        mem: &mut MemoryStore,
    ) -> Result<(Access, usize), SimError> {
        let tag = self.tag_of(addr);
        let index = self.index_of(addr) as usize;

        for way in 0..self.ways as usize {
            if self.sets[index][way].valid && self.sets[index][way].tag == tag {
                self.use_counter += 1;
                self.sets[index][way].last_used = self.use_counter;
                self.hits += 1;
                return Ok((Access::Hit, way));
            }
        }

        self.misses += 1;
        let way = self.evict(index, mem)?;

        let base = addr - self.offset_of(addr);
        for i in 0..self.block_size {
            let byte = mem.get(base + i, MemSize::Byte)?;
            self.sets[index][way].data[i as usize] = byte as u8;
        }
        self.use_counter += 1;
        let block = &mut self.sets[index][way];
        block.tag = tag;
        block.valid = true;
        block.dirty = false;
        block.last_used = self.use_counter;

        Ok((Access::Miss, way))
    }

    /// Selects a victim way in the given set and writes it back if dirty.
    ///
    /// The first invalid way is preferred; otherwise the way with the
    /// smallest LRU timestamp is chosen. A dirty victim is flushed
    /// byte-by-byte at the address reconstructed from its own tag.
    fn evict(&mut self, index: usize, mem: &mut MemoryStore) -> Result<usize, SimError> {
        let mut victim = 0usize;
        let mut oldest = u64::MAX;
        for way in 0..self.ways as usize {
            if !self.sets[index][way].valid {
                victim = way;
                break;
            }
            if self.sets[index][way].last_used < oldest {
                victim = way;
                oldest = self.sets[index][way].last_used;
            }
        }

        self.sets[index][victim].valid = false;
        if self.sets[index][victim].dirty {
            let base = self.block_addr(self.sets[index][victim].tag, index as u32);
            for i in 0..self.block_size {
                let byte = self.sets[index][victim].data[i as usize];
                mem.set(base + i, MemSize::Byte, u32::from(byte))?;
            }
            self.sets[index][victim].dirty = false;
        }
        Ok(victim)
    }

    /// Reconstructs a block's base address from its tag and set index.
    ///
    /// The tag shift is guarded for the degenerate single-set, single-byte
    /// geometry where the set bits span the whole word.
    #[inline]
    fn block_addr(&self, tag: u32, index: u32) -> u32 {
        let tag_part = if self.tag_bits == 0 {
            0
        } else {
            tag << (self.index_bits + self.offset_bits)
        };
        tag_part | (index << self.offset_bits)
    }

    /// Extracts the tag field; zero when the tag field is zero bits wide.
    #[inline]
    fn tag_of(&self, addr: u32) -> u32 {
        if self.tag_bits == 0 {
            0
        } else {
            addr >> (self.offset_bits + self.index_bits)
        }
    }

    /// Extracts the set index; zero when there is a single set.
    #[inline]
    fn index_of(&self, addr: u32) -> u32 {
        if self.index_bits == 0 {
            0
        } else {
            (addr >> self.offset_bits) & ((1 << self.index_bits) - 1)
        }
    }

    /// Extracts the byte offset within the block; zero for one-byte blocks.
    #[inline]
    fn offset_of(&self, addr: u32) -> u32 {
        if self.offset_bits == 0 {
            0
        } else {
            addr & ((1 << self.offset_bits) - 1)
        }
    }
}
