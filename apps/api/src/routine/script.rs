//! Splits a generation reply into the routine and the optional meditation script.

use crate::routine::prompts::MEDITATION_MARKER;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReply {
    pub routine_text: String,
    pub meditation_script: Option<String>,
}

/// The marker must sit on its own line (surrounding whitespace and markdown
/// emphasis tolerated). Without it the whole reply is the routine.
pub fn split_reply(reply: &str) -> SplitReply {
    let mut offset = 0;
    for line in reply.split_inclusive('\n') {
        let bare = line.trim().trim_matches(|c| c == '*' || c == '#').trim();
        if bare == MEDITATION_MARKER {
            let routine = reply[..offset].trim();
            let script = reply[offset + line.len()..].trim();
            return SplitReply {
                routine_text: routine.to_string(),
                meditation_script: (!script.is_empty()).then(|| script.to_string()),
            };
        }
        offset += line.len();
    }

    SplitReply {
        routine_text: reply.trim().to_string(),
        meditation_script: None,
    }
}
