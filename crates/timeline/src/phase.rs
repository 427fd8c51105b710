use crate::burst::Burst;
use crate::category::{phase_label, ToolCategory};
use crate::config::TimelineConfig;
use agentlens_core::time::timestamp_ms;

/// Per-tool event count within a phase, for the condensed "top N tools"
/// badge line. Sorted descending by count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolUsage {
    pub name: String,
    pub count: usize,
}

/// A coherent stretch of session activity: consecutive bursts whose
/// end-to-start gaps stay within the phase threshold.
#[derive(Debug, Clone)]
pub struct Phase<'a> {
    pub label: String,
    pub bursts: Vec<Burst<'a>>,
    pub started_at: Option<&'a str>,
    pub ended_at: Option<&'a str>,
    pub total_calls: usize,
    pub dominant_category: ToolCategory,
    pub tool_summary: Vec<ToolUsage>,
}

/// Group an ordered burst sequence into phases.
///
/// A new phase begins when the gap between the previous burst's end and the
/// next burst's start exceeds `config.phase_gap_ms`; burst identity is
/// irrelevant at this grain. The final run is always flushed.
pub fn build_phases<'a>(bursts: Vec<Burst<'a>>, config: &TimelineConfig) -> Vec<Phase<'a>> {
    let mut phases = Vec::new();
    let mut run: Vec<Burst<'a>> = Vec::new();

    for burst in bursts {
        if let Some(previous) = run.last() {
            let prev_end = timestamp_ms(previous.ended_at);
            let next_start = timestamp_ms(burst.started_at);
            if next_start.abs_diff(prev_end) > config.phase_gap_ms {
                phases.push(seal_phase(std::mem::take(&mut run)));
            }
        }
        run.push(burst);
    }
    if !run.is_empty() {
        phases.push(seal_phase(run));
    }
    phases
}

/// Compute phase aggregates over a non-empty run of bursts.
///
/// Category and tool counts accumulate in first-occurrence order so that the
/// dominant-category tie-break and the tool-summary sort are deterministic:
/// on equal counts, whichever key appeared first in burst-processing order
/// wins.
fn seal_phase(bursts: Vec<Burst<'_>>) -> Phase<'_> {
    let mut tool_counts: Vec<(String, usize)> = Vec::new();
    let mut category_counts: Vec<(ToolCategory, usize)> = Vec::new();
    let mut total_calls = 0usize;

    for burst in &bursts {
        total_calls += burst.count;
        match tool_counts.iter_mut().find(|(name, _)| *name == burst.name) {
            Some((_, count)) => *count += burst.count,
            None => tool_counts.push((burst.name.clone(), burst.count)),
        }
        match category_counts
            .iter_mut()
            .find(|(category, _)| *category == burst.category)
        {
            Some((_, count)) => *count += burst.count,
            None => category_counts.push((burst.category, burst.count)),
        }
    }

    let mut dominant_category = ToolCategory::Other;
    let mut max_count = 0usize;
    for (category, count) in &category_counts {
        if *count > max_count {
            dominant_category = *category;
            max_count = *count;
        }
    }

    let mut tool_summary: Vec<ToolUsage> = tool_counts
        .into_iter()
        .map(|(name, count)| ToolUsage { name, count })
        .collect();
    // Stable sort keeps first-occurrence order among equal counts.
    tool_summary.sort_by(|a, b| b.count.cmp(&a.count));

    Phase {
        label: phase_label(dominant_category).to_string(),
        started_at: bursts.first().and_then(|b| b.started_at),
        ended_at: bursts.last().and_then(|b| b.ended_at),
        bursts,
        total_calls,
        dominant_category,
        tool_summary,
    }
}
