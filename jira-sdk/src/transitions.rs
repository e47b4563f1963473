// ABOUTME: Resolves a free-form status string to one of a ticket's available transitions
// ABOUTME: Exact match, then alias table, then substring fallback with last-match-wins

use log::debug;
use phf::phf_map;

use crate::error::ResolutionError;
use crate::types::Transition;

/// Canonical status name -> accepted lowercase, whitespace-free synonyms.
pub static STATUS_ALIASES: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "To Do" => &["todo", "td", "t"],
    "In Progress" => &["inprogress", "progress", "ip", "p"],
    "Done" => &["done", "d", "complete", "completed"],
    "In Review" => &["review", "r", "inreview"],
    "Blocked" => &["blocked", "b", "block"],
    "Backlog" => &["backlog", "bl"],
};

fn alias_matches(status_name: &str, compact_input: &str) -> bool {
    STATUS_ALIASES
        .get(status_name)
        .is_some_and(|aliases| aliases.contains(&compact_input))
}

/// Pick the transition the user meant.
///
/// Transitions are scanned in the order the server returned them. The first
/// exact (case-insensitive) or alias hit wins. Only when neither tier matches
/// anywhere does the substring tier run, and there the *last* matching
/// transition wins.
pub fn resolve<'a>(
    transitions: &'a [Transition],
    input: &str,
) -> Result<&'a Transition, ResolutionError> {
    let lowered = input.trim().to_lowercase();
    let compact: String = lowered.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.is_empty() {
        return Err(no_match(transitions, input));
    }

    for transition in transitions {
        let target = transition.target();
        if target.to_lowercase() == lowered {
            debug!("status '{}' matched '{}' exactly", input, target);
            return Ok(transition);
        }
        if alias_matches(target, &compact) {
            debug!("status '{}' matched '{}' by alias", input, target);
            return Ok(transition);
        }
    }

    let mut candidate = None;
    for transition in transitions {
        if transition.target().to_lowercase().contains(&compact) {
            candidate = Some(transition);
        }
    }

    match candidate {
        Some(transition) => {
            debug!(
                "status '{}' matched '{}' by substring",
                input,
                transition.target()
            );
            Ok(transition)
        }
        None => Err(no_match(transitions, input)),
    }
}

fn no_match(transitions: &[Transition], input: &str) -> ResolutionError {
    ResolutionError::NoMatch {
        input: input.to_string(),
        available: transitions
            .iter()
            .map(|t| t.target().to_string())
            .collect(),
    }
}
