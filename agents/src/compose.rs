// ═══════════════════════════════════════════════════════════════════════
// Bundle composition — cartesian product of per-agent command lists
// ═══════════════════════════════════════════════════════════════════════
//
// Each living agent contributes its top few commands; the composer
// enumerates every combination as a team bundle. Enumeration is lazy so
// the cap cuts work, not just output, and the first bundle is always
// "everyone takes their best command". Hitting the cap is reported, not
// fatal: the capped prefix already holds the greedy assignment and its
// neighbourhood.

use splash_engine::types::{AgentCommand, TeamCommand};

/// Hard cap on bundles per turn, keeping the turn inside its budget even
/// for full squads.
pub const MAX_TEAM_BUNDLES: usize = 1024;

/// Commands considered per agent during composition. Two per agent keeps
/// five agents at 2^5 = 32 bundles.
pub const DEFAULT_SEARCH_WIDTH: usize = 2;

/// Whether composition enumerated the whole bundle space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeStatus {
    Complete,
    Truncated,
}

/// The per-agent command shortlists feeding one composition pass.
#[derive(Debug, Clone)]
pub struct TeamPlans {
    options: Vec<Vec<AgentCommand>>,
}

impl TeamPlans {
    /// Keep the top `width` commands per agent. Agents with no commands
    /// at all are dropped; they fall back to hunkering at output time.
    pub fn new(per_agent: Vec<Vec<AgentCommand>>, width: usize) -> TeamPlans {
        let width = width.max(1);
        let options = per_agent
            .into_iter()
            .filter(|cmds| !cmds.is_empty())
            .map(|mut cmds| {
                cmds.truncate(width);
                cmds
            })
            .collect();
        TeamPlans { options }
    }

    /// Size of the full bundle space.
    pub fn bundle_space(&self) -> usize {
        if self.options.is_empty() {
            0
        } else {
            self.options.iter().map(Vec::len).product()
        }
    }

    pub fn assignments(&self) -> AssignmentIter<'_> {
        AssignmentIter {
            plans: self,
            indices: vec![0; self.options.len()],
            done: self.options.is_empty(),
        }
    }
}

/// Lazy mixed-radix counter over the per-agent shortlists. The first
/// yielded bundle picks index 0 everywhere, the greedy assignment.
pub struct AssignmentIter<'a> {
    plans: &'a TeamPlans,
    indices: Vec<usize>,
    done: bool,
}

impl Iterator for AssignmentIter<'_> {
    type Item = TeamCommand;

    fn next(&mut self) -> Option<TeamCommand> {
        if self.done {
            return None;
        }

        let commands = self
            .indices
            .iter()
            .zip(&self.plans.options)
            .map(|(&i, cmds)| cmds[i])
            .collect();

        // Advance the counter, least significant digit last.
        self.done = true;
        for (digit, cmds) in self.indices.iter_mut().zip(&self.plans.options).rev() {
            *digit += 1;
            if *digit < cmds.len() {
                self.done = false;
                break;
            }
            *digit = 0;
        }

        Some(TeamCommand { commands })
    }
}

/// Enumerate up to `cap` bundles and say whether that was all of them.
pub fn compose_team(plans: &TeamPlans, cap: usize) -> (Vec<TeamCommand>, ComposeStatus) {
    let mut bundles: Vec<TeamCommand> = plans.assignments().take(cap).collect();
    let status = if plans.bundle_space() > bundles.len() {
        ComposeStatus::Truncated
    } else {
        ComposeStatus::Complete
    };
    bundles.shrink_to_fit();
    (bundles, status)
}
