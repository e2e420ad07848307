//! Direction-agnostic flow identity.

use crate::error::RecordError;
use crate::records::{self, DST_ADDR, DST_PORT, SRC_ADDR, SRC_PORT};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Endpoint {
    pub addr: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(addr: impl Into<String>, port: u16) -> Self {
        Self {
            addr: addr.into(),
            port,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Uplink,
    Downlink,
}

impl Direction {
    pub const BOTH: [Direction; 2] = [Direction::Uplink, Direction::Downlink];

    pub fn index(self) -> usize {
        match self {
            Direction::Uplink => 0,
            Direction::Downlink => 1,
        }
    }
}

/// A 4-tuple as observed on a packet. A key and its reversed tuple compare
/// equal and hash identically, so either orientation finds the same flow.
#[derive(Debug, Clone)]
pub struct FlowKey {
    src: Endpoint,
    dst: Endpoint,
}

impl FlowKey {
    pub fn new(src_addr: impl Into<String>, dst_addr: impl Into<String>, src_port: u16, dst_port: u16) -> Self {
        Self {
            src: Endpoint::new(src_addr, src_port),
            dst: Endpoint::new(dst_addr, dst_port),
        }
    }

    pub fn from_record<S: AsRef<str>>(fields: &[S]) -> Result<Self, RecordError> {
        Ok(Self::new(
            records::field(fields, SRC_ADDR, "source address")?,
            records::field(fields, DST_ADDR, "destination address")?,
            records::parse_port(fields, SRC_PORT, "source port")?,
            records::parse_port(fields, DST_PORT, "destination port")?,
        ))
    }

    pub fn src(&self) -> &Endpoint {
        &self.src
    }

    pub fn dst(&self) -> &Endpoint {
        &self.dst
    }

    pub fn reversed(&self) -> Self {
        Self {
            src: self.dst.clone(),
            dst: self.src.clone(),
        }
    }

    /// Orientation of `observed` relative to this key. Only meaningful when
    /// `observed == self`.
    pub fn sense_of(&self, observed: &FlowKey) -> Direction {
        if self.src == observed.src && self.dst == observed.dst {
            Direction::Uplink
        } else {
            Direction::Downlink
        }
    }

    fn ordered(&self) -> (&Endpoint, &Endpoint) {
        if self.src <= self.dst {
            (&self.src, &self.dst)
        } else {
            (&self.dst, &self.src)
        }
    }
}

impl PartialEq for FlowKey {
    fn eq(&self, other: &Self) -> bool {
        (self.src == other.src && self.dst == other.dst) || (self.src == other.dst && self.dst == other.src)
    }
}

impl Eq for FlowKey {}

impl Hash for FlowKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (lo, hi) = self.ordered();
        lo.hash(state);
        hi.hash(state);
    }
}

impl std::fmt::Display for FlowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} -> {}:{}",
            self.src.addr, self.src.port, self.dst.addr, self.dst.port
        )
    }
}
