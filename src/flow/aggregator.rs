//! Running statistics for one bidirectional flow.
//!
//! Packets are folded in one at a time; nothing per-packet is retained.
//! Index 0 of every per-direction pair is the uplink (the orientation of the
//! packet that created the flow), index 1 the downlink.

use super::key::{Direction, FlowKey};
use crate::error::RecordError;
use crate::features::{FeatureValue, FeatureVector, FEATURE_DIM};
use crate::records::{PacketFields, TcpFlags};

const MICROS_PER_SEC: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    New,
    Open,
    Fin,
    FinAck,
    Closed,
}

/// TLS-style application record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    ChangeCipherSpec,
    Alert,
    Handshake,
    ApplicationData,
    Heartbeat,
}

impl ContentType {
    pub const ALL: [ContentType; 5] = [
        ContentType::ChangeCipherSpec,
        ContentType::Alert,
        ContentType::Handshake,
        ContentType::ApplicationData,
        ContentType::Heartbeat,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            20 => Some(Self::ChangeCipherSpec),
            21 => Some(Self::Alert),
            22 => Some(Self::Handshake),
            23 => Some(Self::ApplicationData),
            24 => Some(Self::Heartbeat),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        20 + self.index() as i64
    }

    fn index(self) -> usize {
        match self {
            Self::ChangeCipherSpec => 0,
            Self::Alert => 1,
            Self::Handshake => 2,
            Self::ApplicationData => 3,
            Self::Heartbeat => 4,
        }
    }
}

/// Max/min plus an integer running mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gauge {
    pub avg: i64,
    pub max: i64,
    pub min: i64,
}

impl Gauge {
    fn new() -> Self {
        Self {
            avg: 0,
            max: 0,
            min: i64::MAX,
        }
    }

    /// `count` already includes this observation. The mean step uses integer
    /// division, so it drifts from the exact mean; datasets depend on it.
    /// Arithmetic wraps on overflow.
    fn observe(&mut self, value: i64, count: i64) {
        self.avg = self.avg.wrapping_add(value.wrapping_sub(self.avg) / count);
        if self.max < value {
            self.max = value;
        }
        if self.min > value {
            self.min = value;
        }
    }

    fn push_into(&self, out: &mut Vec<FeatureValue>) {
        out.push(FeatureValue::Integer(self.max));
        out.push(FeatureValue::Integer(self.min));
        out.push(FeatureValue::Integer(self.avg));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionStats {
    pub packets: i64,
    pub bytes: i64,
    pub size: Gauge,
    pub window: Gauge,
    pub ttl: Gauge,
    pub flags: TcpFlags,
    /// Packets looked at for an application record type.
    pub app_records: i64,
    content_types: [i64; 5],
}

impl DirectionStats {
    fn new() -> Self {
        Self {
            packets: 0,
            bytes: 0,
            size: Gauge::new(),
            window: Gauge::new(),
            ttl: Gauge::new(),
            flags: TcpFlags::default(),
            app_records: 0,
            content_types: [0; 5],
        }
    }

    fn observe(&mut self, packet: &PacketFields) {
        self.packets += 1;
        self.bytes = self.bytes.wrapping_add(packet.size);
        self.size.observe(packet.size, self.packets);
        self.window.observe(packet.window, self.packets);
        self.ttl.observe(packet.ttl, self.packets);
        self.flags += packet.flags;

        self.app_records += 1;
        if let Some(ct) = packet.content_type.and_then(ContentType::from_code) {
            self.content_types[ct.index()] += 1;
        }
    }

    pub fn content_count(&self, content_type: ContentType) -> i64 {
        self.content_types[content_type.index()]
    }

    /// NaN when the direction saw no packets.
    pub fn flag_fractions(&self) -> [f64; 6] {
        self.flags
            .to_array()
            .map(|count| count as f64 / self.packets as f64)
    }

    /// NaN when the direction saw no application records.
    pub fn content_fractions(&self) -> [f64; 5] {
        self.content_types
            .map(|count| count as f64 / self.app_records as f64)
    }
}

pub struct FlowAggregator {
    key: FlowKey,
    start_timestamp: i64,
    last_timestamp: Option<i64>,
    stats: [DirectionStats; 2],
    state: FlowState,
}

impl FlowAggregator {
    pub fn new(key: FlowKey, start_timestamp: i64) -> Self {
        Self {
            key,
            start_timestamp,
            last_timestamp: None,
            stats: [DirectionStats::new(), DirectionStats::new()],
            state: FlowState::New,
        }
    }

    /// Parse and fold one raw record. `Ok(false)` means the flow is closed and
    /// the record was ignored without being parsed.
    pub fn ingest<S: AsRef<str>>(&mut self, observed: &FlowKey, fields: &[S]) -> Result<bool, RecordError> {
        if self.state == FlowState::Closed {
            return Ok(false);
        }
        let packet = PacketFields::parse(fields)?;
        Ok(self.observe(observed, &packet))
    }

    /// Fold an already parsed packet. Returns `false` if the flow is closed.
    pub fn observe(&mut self, observed: &FlowKey, packet: &PacketFields) -> bool {
        if self.state == FlowState::Closed {
            return false;
        }
        let direction = self.key.sense_of(observed);

        if self.start_timestamp == 0 {
            self.start_timestamp = packet.timestamp;
        } else {
            self.last_timestamp = Some(packet.timestamp);
        }

        self.stats[direction.index()].observe(packet);
        self.advance_state(&packet.flags);
        true
    }

    // Assumes FIN, FIN/ACK and the final ACK arrive in order. Closing is judged
    // against the state before this packet, so a FIN/ACK only arms it.
    fn advance_state(&mut self, flags: &TcpFlags) {
        let before = self.state;
        if flags.fin == 1 {
            self.state = if flags.ack == 0 {
                FlowState::Fin
            } else {
                FlowState::FinAck
            };
        }
        if before == FlowState::FinAck && flags.ack == 1 {
            self.state = FlowState::Closed;
        }
    }

    pub fn key(&self) -> &FlowKey {
        &self.key
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == FlowState::Closed
    }

    pub fn stats(&self, direction: Direction) -> &DirectionStats {
        &self.stats[direction.index()]
    }

    pub fn start_timestamp(&self) -> i64 {
        self.start_timestamp
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.last_timestamp
    }

    /// Microseconds between the first and the last packet; 0 until a second
    /// timestamp has been recorded.
    pub fn duration(&self) -> i64 {
        self.last_timestamp
            .map(|last| last.wrapping_sub(self.start_timestamp))
            .unwrap_or(0)
    }

    pub fn avg_uplink_packet_size(&self) -> i64 {
        self.stats[0].size.avg
    }

    pub fn max_uplink_packet_size(&self) -> i64 {
        self.stats[0].size.max
    }

    pub fn feature_vector(&self) -> FeatureVector {
        let mut values = Vec::with_capacity(FEATURE_DIM);
        let [up, down] = &self.stats;

        values.push(FeatureValue::Text(self.key.src().addr.clone()));
        values.push(FeatureValue::Text(self.key.dst().addr.clone()));
        values.push(FeatureValue::Integer(i64::from(self.key.src().port)));
        values.push(FeatureValue::Integer(i64::from(self.key.dst().port)));

        let duration = self.duration();
        values.push(FeatureValue::Integer(duration));

        // Rates use whole seconds; below one second they are reported as 0.
        let secs = duration / MICROS_PER_SEC;
        if secs > 0 {
            let secs = secs as f32;
            values.push(FeatureValue::Rate(up.packets as f32 / secs));
            values.push(FeatureValue::Rate(down.packets as f32 / secs));
            values.push(FeatureValue::Rate(up.bytes as f32 / secs));
            values.push(FeatureValue::Rate(down.bytes as f32 / secs));
        } else {
            values.extend(std::iter::repeat(FeatureValue::Integer(0)).take(4));
        }

        let gauges: [fn(&DirectionStats) -> Gauge; 3] = [|s| s.size, |s| s.window, |s| s.ttl];
        for gauge in gauges {
            gauge(up).push_into(&mut values);
            gauge(down).push_into(&mut values);
        }

        for stats in [up, down] {
            values.extend(stats.flag_fractions().map(FeatureValue::Ratio));
        }
        for stats in [up, down] {
            values.extend(stats.content_fractions().map(FeatureValue::Ratio));
        }

        debug_assert_eq!(values.len(), FEATURE_DIM);
        FeatureVector { values }
    }
}
