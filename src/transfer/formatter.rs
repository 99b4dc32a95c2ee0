use super::{TransferEdge, TransferMap};
use crate::payload::NO_CONDITION;

/// Renders a transfer map as an indented, human-readable listing.
///
/// ```text
/// Greeting
///   -> Billing  [forward: user asks about invoices]
/// Billing
///   (no outgoing edges)
/// ```
pub struct TransferMapFormatter;

impl TransferMapFormatter {
    pub fn format(map: &TransferMap) -> String {
        let index = map.index();
        let rows = index.rows();
        if rows.is_empty() {
            return "No node transfer edges available in the current snapshot.\n".to_string();
        }

        let mut out = String::new();
        for row in rows {
            out.push_str(row.node_name);
            out.push('\n');
            if row.outgoing.is_empty() {
                out.push_str("  (no outgoing edges)\n");
                continue;
            }
            for edge in row.outgoing {
                out.push_str(&Self::format_edge(edge));
                out.push('\n');
            }
        }
        out
    }

    /// Formats one edge; the backward condition is shown only when present.
    fn format_edge(edge: &TransferEdge) -> String {
        let mut line = format!(
            "  -> {}  [forward: {}",
            edge.target,
            Self::single_line(&edge.forward_condition)
        );
        if !edge.backward_condition.is_empty() && edge.backward_condition != NO_CONDITION {
            line.push_str(&format!(
                "; backward: {}",
                Self::single_line(&edge.backward_condition)
            ));
        }
        line.push(']');
        line
    }

    /// Collapses multi-line condition text (pretty JSON) onto one line.
    fn single_line(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
