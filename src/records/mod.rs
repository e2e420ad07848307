//! Packet records: flat string tuples exported by the upstream traffic probe.
//! One record per captured packet; the field positions below are fixed.

mod reader;

pub use reader::{Record, RecordBatch, RecordReader};

use crate::error::RecordError;

/// Capture timestamp, seconds with a literal `.` before the microseconds.
pub const TIMESTAMP: usize = 3;
pub const SRC_ADDR: usize = 6;
pub const DST_ADDR: usize = 7;
pub const SRC_PORT: usize = 8;
pub const DST_PORT: usize = 9;
/// First per-packet statistic (packet size); the rest follow in order.
pub const STATS_OFFSET: usize = 10;
pub const CONTENT_TYPE: usize = STATS_OFFSET + 9;

/// Records shorter than this are not packet records and are skipped on read.
pub const MIN_FIELDS: usize = 10;
/// The content-type code is only looked at when the record is at least this long.
pub const CONTENT_TYPE_MIN_FIELDS: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TcpFlags {
    pub fin: i64,
    pub syn: i64,
    pub rst: i64,
    pub psh: i64,
    pub ack: i64,
    pub urg: i64,
}

impl std::ops::AddAssign for TcpFlags {
    fn add_assign(&mut self, other: Self) {
        self.fin = self.fin.wrapping_add(other.fin);
        self.syn = self.syn.wrapping_add(other.syn);
        self.rst = self.rst.wrapping_add(other.rst);
        self.psh = self.psh.wrapping_add(other.psh);
        self.ack = self.ack.wrapping_add(other.ack);
        self.urg = self.urg.wrapping_add(other.urg);
    }
}

impl TcpFlags {
    /// FIN, SYN, RST, PSH, ACK, URG.
    pub fn to_array(self) -> [i64; 6] {
        [self.fin, self.syn, self.rst, self.psh, self.ack, self.urg]
    }
}

/// Numeric part of one packet record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketFields {
    /// Microseconds.
    pub timestamp: i64,
    pub size: i64,
    pub window: i64,
    pub ttl: i64,
    pub flags: TcpFlags,
    /// Application record type, if present and numeric.
    pub content_type: Option<i64>,
}

impl PacketFields {
    pub fn parse<S: AsRef<str>>(fields: &[S]) -> Result<Self, RecordError> {
        let timestamp = parse_timestamp(fields)?;
        let stat = |offset: usize, name: &'static str| parse_number(fields, STATS_OFFSET + offset, name);

        let size = stat(0, "packet size")?;
        let window = stat(1, "tcp window")?;
        let ttl = stat(2, "ttl")?;
        let flags = TcpFlags {
            fin: stat(3, "fin")?,
            syn: stat(4, "syn")?,
            rst: stat(5, "rst")?,
            psh: stat(6, "psh")?,
            ack: stat(7, "ack")?,
            urg: stat(8, "urg")?,
        };

        // An empty or non-numeric content type just means "none".
        let content_type = if fields.len() >= CONTENT_TYPE_MIN_FIELDS {
            fields[CONTENT_TYPE].as_ref().parse::<i64>().ok()
        } else {
            None
        };

        Ok(Self {
            timestamp,
            size,
            window,
            ttl,
            flags,
            content_type,
        })
    }
}

pub fn field<'a, S: AsRef<str>>(
    fields: &'a [S],
    index: usize,
    name: &'static str,
) -> Result<&'a str, RecordError> {
    fields
        .get(index)
        .map(|f| f.as_ref())
        .ok_or(RecordError::MissingField { index, field: name })
}

pub fn parse_number<S: AsRef<str>>(
    fields: &[S],
    index: usize,
    name: &'static str,
) -> Result<i64, RecordError> {
    let raw = field(fields, index, name)?;
    raw.parse::<i64>().map_err(|source| RecordError::InvalidNumber {
        index,
        field: name,
        value: raw.to_string(),
        source,
    })
}

pub fn parse_port<S: AsRef<str>>(
    fields: &[S],
    index: usize,
    name: &'static str,
) -> Result<u16, RecordError> {
    let raw = field(fields, index, name)?;
    raw.parse::<u16>().map_err(|source| RecordError::InvalidNumber {
        index,
        field: name,
        value: raw.to_string(),
        source,
    })
}

/// `"1490274180.123456"` -> `1490274180123456`
pub fn parse_timestamp<S: AsRef<str>>(fields: &[S]) -> Result<i64, RecordError> {
    let raw = field(fields, TIMESTAMP, "timestamp")?;
    let digits = raw.replace('.', "");
    digits.parse::<i64>().map_err(|source| RecordError::InvalidNumber {
        index: TIMESTAMP,
        field: "timestamp",
        value: raw.to_string(),
        source,
    })
}
