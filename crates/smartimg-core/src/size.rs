//! Size and number parsing for command-line arguments
//!
//! Accepts plain decimal (`4096`), hex (`0x1000`) and binary-unit suffixes
//! (`4 KiB`, `4K`, `4KB`, `1 MiB`, `1M`, `1MB`). All suffixes are powers of
//! 1024.

use crate::error::{ImageError, Result};

/// Parse a number that can be hex (0x...) or decimal
pub fn parse_number(s: &str) -> Result<u64> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex.trim(), 16)
            .map_err(|e| ImageError::InvalidSize(format!("invalid hex '{}': {}", s, e)))
    } else {
        s.parse()
            .map_err(|e| ImageError::InvalidSize(format!("invalid number '{}': {}", s, e)))
    }
}

/// Parse a size string like "512 KiB" or "0x80000"
pub fn parse_size(s: &str) -> Result<u64> {
    let trimmed = s.trim();

    if let Ok(n) = parse_number(trimmed) {
        return Ok(n);
    }

    let lower = trimmed.to_lowercase();
    let (num_str, multiplier) = if let Some(n) = strip_any(&lower, &["mib", "mb", "m"]) {
        (n, 1024 * 1024)
    } else if let Some(n) = strip_any(&lower, &["kib", "kb", "k"]) {
        (n, 1024)
    } else {
        return Err(ImageError::InvalidSize(format!("unrecognised size '{}'", s)));
    };

    let n = parse_number(num_str)?;
    n.checked_mul(multiplier)
        .ok_or_else(|| ImageError::InvalidSize(format!("size '{}' overflows", s)))
}

fn strip_any<'a>(s: &'a str, suffixes: &[&str]) -> Option<&'a str> {
    suffixes
        .iter()
        .find_map(|suffix| s.strip_suffix(suffix))
        .map(str::trim)
}
