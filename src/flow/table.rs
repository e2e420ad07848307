//! Routes packet records to the aggregator of their flow.

use super::aggregator::FlowAggregator;
use super::key::FlowKey;
use crate::error::RecordError;
use crate::features::FeatureVector;
use crate::records::{self, PacketFields};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Flows in creation order, indexed by direction-agnostic key.
#[derive(Default)]
pub struct FlowTable {
    index: HashMap<FlowKey, usize>,
    flows: Vec<FlowAggregator>,
}

impl FlowTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator for `key` in either orientation. A new one is keyed on this
    /// exact orientation and seeded with the record's timestamp. Nothing is
    /// inserted unless the timestamp parses.
    pub fn route_or_create<S: AsRef<str>>(
        &mut self,
        key: &FlowKey,
        fields: &[S],
    ) -> Result<&mut FlowAggregator, RecordError> {
        if let Some(&idx) = self.index.get(key) {
            trace!(flow = %key, "packet belongs to a known flow");
            return Ok(&mut self.flows[idx]);
        }
        let start = records::parse_timestamp(fields)?;
        Ok(self.insert(key, start))
    }

    fn insert(&mut self, key: &FlowKey, start: i64) -> &mut FlowAggregator {
        let idx = self.flows.len();
        self.flows.push(FlowAggregator::new(key.clone(), start));
        self.index.insert(key.clone(), idx);
        debug!(flow = %key, start, "new flow");
        &mut self.flows[idx]
    }

    /// Route and fold one raw record. `Ok(false)` when its flow is already closed.
    /// A record that fails to parse leaves the table unchanged.
    pub fn ingest_record<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<bool, RecordError> {
        let key = FlowKey::from_record(fields)?;
        let flow = match self.index.get(&key).copied() {
            Some(idx) => {
                trace!(flow = %key, "packet belongs to a known flow");
                let flow = &mut self.flows[idx];
                if !flow.ingest(&key, fields)? {
                    debug!(flow = %flow.key(), "packet for closed flow ignored");
                    return Ok(false);
                }
                flow
            }
            None => {
                let packet = PacketFields::parse(fields)?;
                let flow = self.insert(&key, packet.timestamp);
                flow.observe(&key, &packet);
                flow
            }
        };
        if flow.is_closed() {
            debug!(flow = %flow.key(), duration_us = flow.duration(), "flow closed");
        }
        Ok(true)
    }

    pub fn get(&self, key: &FlowKey) -> Option<&FlowAggregator> {
        self.index.get(key).map(|&idx| &self.flows[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlowAggregator> {
        self.flows.iter()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// One vector per flow, in creation order.
    pub fn feature_vectors(&self) -> Vec<FeatureVector> {
        self.flows.iter().map(FlowAggregator::feature_vector).collect()
    }
}
