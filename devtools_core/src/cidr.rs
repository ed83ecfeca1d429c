//! CIDR block parsing and comparison for the CIDR tester tool.
//!
//! Both address families are held as an integer value plus the prefix length
//! exactly as typed. The prefix is kept verbatim so that a half-typed
//! `10.0.0.0/99` still parses and reports the `-1` address count, while
//! every masking operation clamps it to the address width.

use std::fmt;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

use num_bigint::BigInt;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

const V4_WIDTH: u32 = 32;
const V6_WIDTH: u32 = 128;

static CONFLICT_CANDIDATES: OnceLock<Regex> = OnceLock::new();

/// Failure to read a CIDR expression. The payload is the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Invalid prefix length: {0}")]
    InvalidPrefix(String),
}

/// How one block relates to another that shares its network bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Containment {
    /// The left block contains the right one (equal blocks included).
    Superset,
    /// The left block is contained by the right one.
    Subset,
}

impl Containment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Superset => "superset",
            Self::Subset => "subset",
        }
    }
}

impl fmt::Display for Containment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidrBlock4 {
    expression: String,
    octets: [u8; 4],
    reserved_bit_count: u32,
}

impl CidrBlock4 {
    pub fn octets(&self) -> [u8; 4] {
        self.octets
    }

    fn value(&self) -> u128 {
        u128::from(u32::from_be_bytes(self.octets))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidrBlock6 {
    expression: String,
    hextets: [u16; 8],
    reserved_bit_count: u32,
}

impl CidrBlock6 {
    pub fn hextets(&self) -> [u16; 8] {
        self.hextets
    }

    fn value(&self) -> u128 {
        self.hextets
            .iter()
            .fold(0u128, |acc, hextet| (acc << 16) | u128::from(*hextet))
    }
}

/// A parsed address/prefix expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CidrBlock {
    V4(CidrBlock4),
    V6(CidrBlock6),
}

impl CidrBlock {
    /// Parses `a.b.c.d[/n]` or colon-hextet notation with optional `::`
    /// compression and `/n`. A missing prefix means the full address width.
    ///
    /// # Example
    /// ```
    /// use devtools_core::cidr::CidrBlock;
    /// let block = CidrBlock::parse("172.168.0.1/16")?;
    /// assert_eq!(block.first_address(), "172.168.0.0");
    /// assert_eq!(block.last_address(), "172.168.255.255");
    /// assert_eq!(block.address_count().to_string(), "65536");
    /// # Ok::<(), devtools_core::cidr::CidrError>(())
    /// ```
    pub fn parse(input: &str) -> Result<Self, CidrError> {
        let expression = input.trim();
        let (address, prefix) = split_prefix(expression)?;
        if address.contains(':') {
            let hextets = parse_hextets(address)
                .ok_or_else(|| CidrError::InvalidAddress(expression.to_string()))?;
            Ok(Self::V6(CidrBlock6 {
                expression: expression.to_string(),
                hextets,
                reserved_bit_count: prefix.unwrap_or(V6_WIDTH),
            }))
        } else {
            let octets = parse_octets(address)
                .ok_or_else(|| CidrError::InvalidAddress(expression.to_string()))?;
            Ok(Self::V4(CidrBlock4 {
                expression: expression.to_string(),
                octets,
                reserved_bit_count: prefix.unwrap_or(V4_WIDTH),
            }))
        }
    }

    /// The trimmed text this block was parsed from.
    pub fn expression(&self) -> &str {
        match self {
            Self::V4(block) => &block.expression,
            Self::V6(block) => &block.expression,
        }
    }

    /// Address width in bits: 32 or 128.
    pub fn width(&self) -> u32 {
        match self {
            Self::V4(_) => V4_WIDTH,
            Self::V6(_) => V6_WIDTH,
        }
    }

    /// Prefix length as written, possibly outside `0..=width`.
    pub fn reserved_bit_count(&self) -> u32 {
        match self {
            Self::V4(block) => block.reserved_bit_count,
            Self::V6(block) => block.reserved_bit_count,
        }
    }

    /// Raw octets (v4) or hextets (v6) widened for display.
    pub fn segments(&self) -> Vec<u16> {
        match self {
            Self::V4(block) => block.octets.iter().map(|octet| u16::from(*octet)).collect(),
            Self::V6(block) => block.hextets.to_vec(),
        }
    }

    /// The address as a 0/1 array, most significant bit first.
    pub fn bits(&self) -> Vec<u8> {
        value_to_bits(self.value(), self.width())
    }

    pub fn first_address(&self) -> String {
        let mask = prefix_mask(self.effective_prefix(), self.width());
        self.render(self.value() & mask)
    }

    pub fn last_address(&self) -> String {
        let width = self.width();
        let mask = prefix_mask(self.effective_prefix(), width);
        self.render((self.value() & mask) | (full_mask(width) & !mask))
    }

    /// The prefix rendered in address notation, e.g. `255.255.0.0`.
    pub fn netmask(&self) -> String {
        self.render(prefix_mask(self.effective_prefix(), self.width()))
    }

    /// `2^(width - prefix)`, or `-1` when the prefix is outside the width.
    pub fn address_count(&self) -> BigInt {
        let width = self.width();
        let reserved = self.reserved_bit_count();
        if reserved > width {
            return BigInt::from(-1);
        }
        BigInt::from(1u8) << (width - reserved)
    }

    /// Whether `address` falls inside this block.
    ///
    /// An empty address counts as included (nothing typed yet); an address that
    /// does not parse, or belongs to the other family, is not.
    pub fn includes(&self, address: &str) -> bool {
        let address = address.trim();
        if address.is_empty() {
            return true;
        }
        let candidate = match Self::parse(address) {
            Ok(candidate) => candidate,
            Err(err) => {
                tracing::debug!(%err, "address to test did not parse");
                return false;
            }
        };
        if candidate.width() != self.width() {
            return false;
        }
        let mask = prefix_mask(self.effective_prefix(), self.width());
        (candidate.value() ^ self.value()) & mask == 0
    }

    /// Compares two blocks of the same family. `None` when neither contains
    /// the other or the families differ.
    ///
    /// # Example
    /// ```
    /// use devtools_core::cidr::{CidrBlock, Containment};
    /// let wide = CidrBlock::parse("abcd::f:1:2/0")?;
    /// let narrow = CidrBlock::parse("abcd::f:1:2/32")?;
    /// assert_eq!(wide.is_conflicting(&narrow), Some(Containment::Superset));
    /// assert_eq!(narrow.is_conflicting(&wide), Some(Containment::Subset));
    /// # Ok::<(), devtools_core::cidr::CidrError>(())
    /// ```
    pub fn is_conflicting(&self, other: &CidrBlock) -> Option<Containment> {
        if self.width() != other.width() {
            return None;
        }
        let own = self.effective_prefix();
        let theirs = other.effective_prefix();
        let mask = prefix_mask(own.min(theirs), self.width());
        if (self.value() ^ other.value()) & mask != 0 {
            return None;
        }
        if own <= theirs {
            Some(Containment::Superset)
        } else {
            Some(Containment::Subset)
        }
    }

    fn effective_prefix(&self) -> u32 {
        self.reserved_bit_count().min(self.width())
    }

    fn value(&self) -> u128 {
        match self {
            Self::V4(block) => block.value(),
            Self::V6(block) => block.value(),
        }
    }

    fn render(&self, value: u128) -> String {
        match self {
            Self::V4(_) => Ipv4Addr::from(value as u32).to_string(),
            Self::V6(_) => (0..8)
                .rev()
                .map(|idx| format!("{:x}", (value >> (idx * 16)) & 0xffff))
                .collect::<Vec<_>>()
                .join(":"),
        }
    }
}

/// Scans free text for CIDR expressions and reports every pair in which one
/// block contains the other, as `"<outer> contains <inner>"`.
///
/// Expressions that look like blocks but fail to parse are skipped.
pub fn check_conflicts(input: &str) -> Vec<String> {
    let pattern = CONFLICT_CANDIDATES.get_or_init(|| {
        Regex::new(r"(?:\d{1,3}\.){3}\d{1,3}/\d+|[0-9A-Fa-f]*:[0-9A-Fa-f:]*/\d+")
            .expect("conflict candidate pattern compiles")
    });
    let blocks: Vec<CidrBlock> = pattern
        .find_iter(input)
        .filter_map(|found| CidrBlock::parse(found.as_str()).ok())
        .collect();

    let mut conflicts = Vec::new();
    for (idx, outer) in blocks.iter().enumerate() {
        for inner in &blocks[idx + 1..] {
            match outer.is_conflicting(inner) {
                Some(Containment::Superset) => conflicts.push(format!(
                    "{} contains {}",
                    outer.expression(),
                    inner.expression()
                )),
                Some(Containment::Subset) => conflicts.push(format!(
                    "{} contains {}",
                    inner.expression(),
                    outer.expression()
                )),
                None => {}
            }
        }
    }
    conflicts
}

fn split_prefix(expression: &str) -> Result<(&str, Option<u32>), CidrError> {
    let Some((address, prefix)) = expression.split_once('/') else {
        return Ok((expression, None));
    };
    let prefix = prefix.trim();
    let well_formed =
        !prefix.is_empty() && prefix.len() <= 3 && prefix.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(CidrError::InvalidPrefix(expression.to_string()));
    }
    let value = prefix
        .parse::<u32>()
        .map_err(|_| CidrError::InvalidPrefix(expression.to_string()))?;
    Ok((address.trim(), Some(value)))
}

fn parse_octets(address: &str) -> Option<[u8; 4]> {
    let parts: Vec<&str> = address.split('.').collect();
    if parts.len() != 4 {
        return None;
    }
    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(parts) {
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse::<u8>().ok()?;
    }
    Some(octets)
}

fn parse_hextets(address: &str) -> Option<[u16; 8]> {
    let groups = match address.split_once("::") {
        Some((head, tail)) => {
            let mut groups = parse_groups(head, true)?;
            let tail = parse_groups(tail, true)?;
            if groups.len() + tail.len() > 7 {
                return None;
            }
            let missing = 8 - groups.len() - tail.len();
            groups.extend(std::iter::repeat_n(0, missing));
            groups.extend(tail);
            groups
        }
        None => parse_groups(address, false)?,
    };
    groups.try_into().ok()
}

/// Empty groups are tolerated next to a `::` so partial input like
/// `abcd::::` still yields an address.
fn parse_groups(text: &str, allow_empty: bool) -> Option<Vec<u16>> {
    if text.is_empty() {
        return Some(Vec::new());
    }
    text.split(':')
        .map(|group| {
            if group.is_empty() {
                return allow_empty.then_some(0);
            }
            if group.len() > 4 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            u16::from_str_radix(group, 16).ok()
        })
        .collect()
}

fn full_mask(width: u32) -> u128 {
    if width >= 128 {
        u128::MAX
    } else {
        (1u128 << width) - 1
    }
}

fn prefix_mask(prefix: u32, width: u32) -> u128 {
    let host_bits = width - prefix.min(width);
    full_mask(width) & !full_mask(host_bits)
}

fn value_to_bits(value: u128, width: u32) -> Vec<u8> {
    (0..width)
        .rev()
        .map(|idx| ((value >> idx) & 1) as u8)
        .collect()
}
