use tracing::{debug, info};

use crate::config::RuleConfig;
use crate::models::ChannelRecord;

/// Why a record was or was not kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Keep,
    /// Group is not in the allow-list
    GroupNotAllowed,
    /// Denylisted name inside the designated group
    Denied,
}

/// Allow-list / denylist classifier
pub struct FilterEngine<'a> {
    rules: &'a RuleConfig,
}

impl<'a> FilterEngine<'a> {
    pub fn new(rules: &'a RuleConfig) -> Self {
        Self { rules }
    }

    pub fn classify(&self, record: &ChannelRecord) -> FilterDecision {
        let group = record.group();
        if !self.rules.allowed_groups.contains(group) {
            return FilterDecision::GroupNotAllowed;
        }
        // Names are only unique per group, so the denylist is scoped
        if group == self.rules.designated_group
            && self.rules.denied_names.contains(record.display_name())
        {
            return FilterDecision::Denied;
        }
        FilterDecision::Keep
    }

    /// Keep allowed records, preserving their relative order
    pub fn apply(&self, records: Vec<ChannelRecord>) -> Vec<ChannelRecord> {
        let input_count = records.len();
        let mut group_excluded = 0usize;
        let mut denied = 0usize;

        let retained: Vec<ChannelRecord> = records
            .into_iter()
            .filter(|record| match self.classify(record) {
                FilterDecision::Keep => true,
                FilterDecision::GroupNotAllowed => {
                    group_excluded += 1;
                    false
                }
                FilterDecision::Denied => {
                    denied += 1;
                    debug!(
                        "Removing denylisted channel '{}' from group '{}'",
                        record.display_name(),
                        record.group()
                    );
                    false
                }
            })
            .collect();

        info!(
            "Completed filtering input_records={} output_records={} group_excluded={} denied={}",
            input_count,
            retained.len(),
            group_excluded,
            denied
        );
        retained
    }
}
