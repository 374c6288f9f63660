//! Context assembly: deduplicate retrieved passages into one grounding block.

use std::collections::HashSet;

/// Assemble retrieved passages into a single context block.
///
/// Each passage is split on line breaks, lines are trimmed and empty lines
/// dropped, exact duplicate lines are removed keeping first-seen order, and
/// the survivors are joined with a blank-line separator. Empty input yields
/// an empty string, which signals "no context" to the answer generator.
pub fn assemble(passages: &[String]) -> String {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();

    for passage in passages {
        for line in passage.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if seen.insert(line.to_string()) {
                lines.push(line);
            }
        }
    }

    lines.join("\n\n")
}
