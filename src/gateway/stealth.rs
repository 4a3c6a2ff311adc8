//! Stealth preprocessing
//!
//! Base64-encodes the outgoing user message and prefixes the system prompt with
//! a decode instruction. History is sent as-is.

use base64::{engine::general_purpose, Engine as _};

use super::types::ChatRequest;

/// Instruction prepended to the system prompt when stealth mode is on
pub const DECODE_INSTRUCTION: &str = "The user's messages are Base64 encoded. \
Decode each message before reading it and respond to the decoded content normally, \
in plain text.";

/// Apply the stealth transform.
///
/// Identity when `stealth_mode` is off. When on, encodes the plaintext message
/// exactly once; a request that has already been transformed passes through.
pub fn apply_stealth(mut request: ChatRequest) -> ChatRequest {
    if !request.stealth_mode || request.stealth_applied {
        return request;
    }

    request.user_message = general_purpose::STANDARD.encode(request.user_message.as_bytes());
    request.system_prompt = if request.system_prompt.is_empty() {
        DECODE_INSTRUCTION.to_string()
    } else {
        format!("{}\n\n{}", DECODE_INSTRUCTION, request.system_prompt)
    };
    request.stealth_applied = true;

    request
}
