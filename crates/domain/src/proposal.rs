use serde::Deserialize;

use crate::ProposedBlock;

#[derive(thiserror::Error, Debug)]
pub enum ProposalError {
    #[error("empty response")]
    Empty,
    #[error("no JSON found in response")]
    NoJson,
    #[error("invalid program structure: {0}")]
    Invalid(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct Program {
    blocks: Vec<ProposedBlock>,
}

/// Extract the proposed blocks from a raw generation response.
///
/// Accepts `{"blocks": [...]}` or a bare array, either as the whole response, inside a fenced
/// code block or embedded in surrounding prose.
pub fn parse_proposal(response: &str) -> Result<Vec<ProposedBlock>, ProposalError> {
    let response = response.trim();

    if response.is_empty() {
        return Err(ProposalError::Empty);
    }

    let json = extract_json(response).ok_or(ProposalError::NoJson)?;

    if json.starts_with('[') {
        Ok(serde_json::from_str(json)?)
    } else {
        Ok(serde_json::from_str::<Program>(json)?.blocks)
    }
}

fn extract_json(response: &str) -> Option<&str> {
    if is_json(response) {
        return Some(response);
    }

    if let Some(block) = fenced_block(response) {
        if let Some(json) = extract_json(block) {
            return Some(json);
        }
    }

    let mut spans = [('{', '}'), ('[', ']')]
        .into_iter()
        .filter_map(|(open, close)| Some((response.find(open)?, response.rfind(close)?)))
        .collect::<Vec<_>>();
    spans.sort_unstable();

    spans.into_iter().find_map(|(start, end)| {
        let candidate = response.get(start..=end)?;
        is_json(candidate).then_some(candidate)
    })
}

fn fenced_block(response: &str) -> Option<&str> {
    let start = response.find("```")?;
    let rest = &response[start + 3..];
    let body_start = rest.find('\n')? + 1;
    let body = &rest[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn is_json(text: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok()
}
