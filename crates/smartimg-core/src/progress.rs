//! Progress reporting for image writes
//!
//! Writers call into a [`WriteProgress`] implementation as they stream an
//! image to disk. The library itself never prints; front ends decide how to
//! render progress (the CLI uses progress bars, tests use [`NoProgress`]).

/// Progress callbacks for a single image write
pub trait WriteProgress {
    /// Called once before the first byte is written
    fn writing(&mut self, total_bytes: usize);

    /// Called after each chunk with the running total
    fn write_progress(&mut self, bytes_written: usize);

    /// Called when the whole image has been written
    fn complete(&mut self, bytes_written: usize);
}

/// A no-op progress reporter
pub struct NoProgress;

impl WriteProgress for NoProgress {
    fn writing(&mut self, _total_bytes: usize) {}
    fn write_progress(&mut self, _bytes_written: usize) {}
    fn complete(&mut self, _bytes_written: usize) {}
}
