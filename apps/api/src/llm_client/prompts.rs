// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Instruction appended to every prompt whose output is read aloud.
pub const SPOKEN_STYLE_INSTRUCTION: &str = "\
    Write in the second person (\"you\") with a calm, steady, encouraging tone. \
    Use short sentences that sound natural when read aloud. \
    Do NOT use tables, emojis, or code blocks.";

/// Keeps coaching output inside the athlete's own plan and away from medical advice.
pub const SCOPE_INSTRUCTION: &str = "\
    CRITICAL: Only reference tactics, strengths, and reminders the athlete supplied. \
    Do NOT invent opponent details or match history. \
    Do NOT give medical, injury, or supplement advice; nutrition cues must use \
    only the targets provided.";
