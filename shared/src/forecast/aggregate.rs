//! Item-level views over scored scenarios

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{ChannelProbabilities, ItemProbability, ScoredScenario};
use crate::types::Channel;

/// Mean probability per item across all of its scenarios, highest first.
/// Equal probabilities are ordered by item name.
pub fn overall_ranking(scored: &[ScoredScenario]) -> Vec<ItemProbability> {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for entry in scored {
        let slot = totals
            .entry(entry.scenario.food_item_name.as_str())
            .or_insert((0.0, 0));
        slot.0 += entry.probability;
        slot.1 += 1;
    }

    let mut ranking: Vec<ItemProbability> = totals
        .into_iter()
        .map(|(name, (sum, count))| ItemProbability {
            food_item_name: name.to_string(),
            probability: sum / count as f64,
        })
        .collect();

    ranking.sort_by(|a, b| {
        descending(a.probability, b.probability).then_with(|| a.food_item_name.cmp(&b.food_item_name))
    });
    ranking
}

/// One row per item with a cell per channel. Missing (item, channel) cells are
/// zero. Sorted by Dine In, then Take Away, both descending.
pub fn channel_split(scored: &[ScoredScenario]) -> Vec<ChannelProbabilities> {
    // item -> channel -> (sum, count)
    let mut cells: BTreeMap<&str, BTreeMap<Channel, (f64, usize)>> = BTreeMap::new();
    for entry in scored {
        let slot = cells
            .entry(entry.scenario.food_item_name.as_str())
            .or_default()
            .entry(entry.scenario.channel)
            .or_insert((0.0, 0));
        slot.0 += entry.probability;
        slot.1 += 1;
    }

    let mut rows: Vec<ChannelProbabilities> = cells
        .into_iter()
        .map(|(name, by_channel)| {
            let cell = |channel: Channel| {
                by_channel
                    .get(&channel)
                    .map(|(sum, count)| sum / *count as f64)
                    .unwrap_or(0.0)
            };
            ChannelProbabilities {
                food_item_name: name.to_string(),
                dine_in: cell(Channel::DineIn),
                take_away: cell(Channel::TakeAway),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        descending(a.dine_in, b.dine_in)
            .then_with(|| descending(a.take_away, b.take_away))
            .then_with(|| a.food_item_name.cmp(&b.food_item_name))
    });
    rows
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
