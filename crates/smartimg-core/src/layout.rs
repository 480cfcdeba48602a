//! Flash image layout
//!
//! The target boots straight out of flash, so the program binary sits at
//! address `0x00000000`. The target's block driver keeps its filesystem in
//! the upper part of flash, starting at [`FS_REGION_BASE`] and addressed in
//! [`SECTOR_SIZE`]-byte sectors. Nothing in this crate formats or parses
//! that filesystem; the layout only names the regions so images can be
//! inspected.
//!
//! Every address maps 1:1 to a file offset: the image has no header.

use crate::flash::ERASED_BYTE;

/// Load address of the program, and its offset in the image
pub const PROGRAM_BASE: u64 = 0x0000_0000;

/// Start of the filesystem area managed by the target
pub const FS_REGION_BASE: u64 = 0x0001_0000;

/// Sector size used by the target's block driver
pub const SECTOR_SIZE: u64 = 512;

/// A named region within a flash image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Name of the region
    pub name: &'static str,
    /// Start offset (inclusive)
    pub start: u64,
    /// End offset (inclusive)
    pub end: u64,
}

impl Region {
    /// Get the size of this region in bytes
    pub fn size(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Check if an offset is within this region
    pub fn contains(&self, offset: u64) -> bool {
        offset >= self.start && offset <= self.end
    }

    /// Number of whole sectors covered by this region
    pub fn sectors(&self) -> u64 {
        self.size() / SECTOR_SIZE
    }
}

/// Regions of a flash image of a given size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashLayout {
    /// Total image size in bytes
    pub size: u64,
    /// Regions in address order
    pub regions: Vec<Region>,
}

impl FlashLayout {
    /// Build the layout for an image of `size` bytes
    ///
    /// Images no larger than [`FS_REGION_BASE`] have only a program region.
    /// An empty image has no regions at all.
    pub fn for_size(size: u64) -> Self {
        let mut regions = Vec::new();

        if size > PROGRAM_BASE {
            regions.push(Region {
                name: "program",
                start: PROGRAM_BASE,
                end: size.min(FS_REGION_BASE) - 1,
            });
        }

        if size > FS_REGION_BASE {
            regions.push(Region {
                name: "filesystem",
                start: FS_REGION_BASE,
                end: size - 1,
            });
        }

        Self { size, regions }
    }

    /// Find a region by name
    pub fn find_region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Find the region containing an offset
    pub fn region_at(&self, offset: u64) -> Option<&Region> {
        self.regions.iter().find(|r| r.contains(offset))
    }
}

/// Returns true if a program of `program_size` bytes reaches into the
/// filesystem area of a flash image
pub fn overruns_fs_region(program_size: u64) -> bool {
    program_size > FS_REGION_BASE
}

/// State of one region in an inspected image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionStatus {
    /// The region
    pub region: Region,
    /// Every byte in the region holds the erased value
    pub erased: bool,
}

/// Summary of a flash image's contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    /// Total image size in bytes
    pub size: u64,
    /// Offset one past the last non-erased byte (0 for a blank image)
    pub programmed_extent: u64,
    /// Per-region state
    pub regions: Vec<RegionStatus>,
}

impl ImageSummary {
    /// True if no byte differs from the erased value
    pub fn is_blank(&self) -> bool {
        self.programmed_extent == 0
    }
}

/// Inspect the contents of a flash image
pub fn inspect(data: &[u8]) -> ImageSummary {
    let layout = FlashLayout::for_size(data.len() as u64);

    let programmed_extent = data
        .iter()
        .rposition(|&b| b != ERASED_BYTE)
        .map_or(0, |pos| pos as u64 + 1);

    let regions = layout
        .regions
        .iter()
        .map(|region| {
            let bytes = &data[region.start as usize..=region.end as usize];
            RegionStatus {
                region: *region,
                erased: bytes.iter().all(|&b| b == ERASED_BYTE),
            }
        })
        .collect();

    ImageSummary {
        size: data.len() as u64,
        programmed_extent,
        regions,
    }
}
