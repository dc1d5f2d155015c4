use tracing::{debug, info};

use crate::config::{AffixStrip, RuleConfig};
use crate::models::{ChannelRecord, GROUP_TITLE, TVG_ID, TVG_NAME};

/// Counters for one engine run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappingStats {
    pub designated: usize,
    pub renamed: usize,
    pub reordered: bool,
    pub stripped: usize,
}

/// Applies rename, reorder and naming-convention rules to filtered records.
///
/// Renames and the reorder only touch the designated group. The strip step
/// runs over the merged output, which lists the designated group first and
/// then every other record in its original relative order.
pub struct DataMappingEngine<'a> {
    rules: &'a RuleConfig,
}

impl<'a> DataMappingEngine<'a> {
    pub fn new(rules: &'a RuleConfig) -> Self {
        Self { rules }
    }

    pub fn apply(&self, records: Vec<ChannelRecord>) -> Vec<ChannelRecord> {
        self.apply_with_stats(records).0
    }

    pub fn apply_with_stats(&self, records: Vec<ChannelRecord>) -> (Vec<ChannelRecord>, MappingStats) {
        let mut stats = MappingStats::default();

        let (mut designated, others): (Vec<_>, Vec<_>) = records
            .into_iter()
            .partition(|record| record.group() == self.rules.designated_group);
        stats.designated = designated.len();

        stats.renamed = designated
            .iter_mut()
            .map(|record| self.rename(record))
            .filter(|renamed| *renamed)
            .count();
        stats.reordered = self.reorder(&mut designated);

        let mut merged = designated;
        merged.extend(others);

        stats.stripped = merged
            .iter_mut()
            .map(|record| self.strip(record))
            .filter(|stripped| *stripped)
            .count();

        info!(
            "Completed data mapping records={} designated={} renamed={} reordered={} stripped={}",
            merged.len(),
            stats.designated,
            stats.renamed,
            stats.reordered,
            stats.stripped
        );
        (merged, stats)
    }

    /// Apply the rename table to one record.
    ///
    /// `tvg-id` and `tvg-name` are only overwritten when the line already
    /// carries them. Returns whether the display name matched a table entry.
    pub fn rename(&self, record: &mut ChannelRecord) -> bool {
        let Some(target) = self.rules.renames.get(record.display_name()) else {
            return false;
        };

        debug!(
            "Renaming channel '{}' -> '{}' (tvg-id={}, tvg-name={})",
            record.display_name(),
            target.name,
            target.tvg_id,
            target.tvg_name
        );
        record.extinf.set_title(target.name.as_str());
        record.extinf.replace_attribute(TVG_ID, target.tvg_id.as_str());
        record.extinf.replace_attribute(TVG_NAME, target.tvg_name.as_str());
        true
    }

    /// Move the reorder target directly behind the anchor.
    ///
    /// The last occurrence of each name is used. Missing anchor or target is a
    /// no-op. Returns whether the sequence was touched.
    pub fn reorder(&self, records: &mut Vec<ChannelRecord>) -> bool {
        let rule = &self.rules.reorder;
        if !rule.enabled || rule.anchor == rule.target {
            return false;
        }

        let anchor_idx = records.iter().rposition(|r| r.display_name() == rule.anchor);
        let target_idx = records.iter().rposition(|r| r.display_name() == rule.target);
        let (Some(anchor_idx), Some(target_idx)) = (anchor_idx, target_idx) else {
            debug!(
                "Skipping reorder, anchor '{}' present={} target '{}' present={}",
                rule.anchor,
                anchor_idx.is_some(),
                rule.target,
                target_idx.is_some()
            );
            return false;
        };

        let target = records.remove(target_idx);
        // Removing an earlier target shifts the anchor down by one
        let insert_at = if target_idx > anchor_idx {
            anchor_idx + 1
        } else {
            anchor_idx
        };
        records.insert(insert_at, target);
        debug!(
            "Moved '{}' from position {} to {} after '{}'",
            rule.target, target_idx, insert_at, rule.anchor
        );
        true
    }

    /// Remove the shared naming tokens from `group-title` and the display name
    pub fn strip(&self, record: &mut ChannelRecord) -> bool {
        let mut changed = false;

        if let Some(group) = record.extinf.attribute(GROUP_TITLE) {
            let stripped = strip_affixes(group, &self.rules.strip.group_title);
            if stripped.len() != group.len() {
                let stripped = stripped.to_string();
                changed |= record.extinf.replace_attribute(GROUP_TITLE, stripped);
            }
        }

        let name = record.display_name();
        let stripped = strip_affixes(name, &self.rules.strip.display_name);
        if stripped.len() != name.len() {
            let stripped = stripped.to_string();
            changed |= record.extinf.set_title(stripped);
        }

        changed
    }
}

/// Remove every leading `prefix` and trailing `suffix`. Empty tokens are ignored.
fn strip_affixes<'v>(value: &'v str, affix: &AffixStrip) -> &'v str {
    let mut value = value;
    if !affix.prefix.is_empty() {
        value = value.trim_start_matches(affix.prefix.as_str());
    }
    if !affix.suffix.is_empty() {
        value = value.trim_end_matches(affix.suffix.as_str());
    }
    value
}
