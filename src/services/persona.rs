//! Target audiences and their system prompts.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

const BOSS_PROMPT: &str = "Convert the following text into a professional, respectful, and formal \
business tone suitable for reporting to a boss. Use appropriate honorifics (존댓말) and clear, \
concise language. Lead with the conclusion, then the supporting details. \
Output only the converted message, without quotes or commentary.";

const COLLEAGUE_PROMPT: &str = "Convert the following text into a polite, cooperative, and \
professional business tone suitable for communicating with a colleague from another team. \
Use the '해요' style (polite informal) but maintain professionalism. Make any request and its \
deadline explicit. Output only the converted message, without quotes or commentary.";

const CLIENT_PROMPT: &str = "Convert the following text into a highly formal, service-oriented, \
and respectful business tone suitable for communicating with an external customer. Use the \
'하십시오' style (formal polite) and emphasize a service mindset. Open with a courteous greeting \
and close with an offer of further help. \
Output only the converted message, without quotes or commentary.";

/// Audience a message is rewritten for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Boss,
    Colleague,
    Client,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Boss, Target::Colleague, Target::Client];

    /// Normalize a raw `target` value.
    ///
    /// Absent or unrecognized values resolve to [`Target::Boss`]. Matching is
    /// exact.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            Some("boss") => Target::Boss,
            Some("colleague") => Target::Colleague,
            Some("client") => Target::Client,
            _ => Target::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Boss => "boss",
            Target::Colleague => "colleague",
            Target::Client => "client",
        }
    }

    /// System prompt for this audience.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Target::Boss => BOSS_PROMPT,
            Target::Colleague => COLLEAGUE_PROMPT,
            Target::Client => CLIENT_PROMPT,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_targets() {
        assert_eq!(Target::resolve(Some("boss")), Target::Boss);
        assert_eq!(Target::resolve(Some("colleague")), Target::Colleague);
        assert_eq!(Target::resolve(Some("client")), Target::Client);
    }

    #[test]
    fn test_resolve_falls_back_to_boss() {
        assert_eq!(Target::resolve(None), Target::Boss);
        assert_eq!(Target::resolve(Some("")), Target::Boss);
        assert_eq!(Target::resolve(Some("manager")), Target::Boss);
        assert_eq!(Target::resolve(Some("Client")), Target::Boss);
        assert_eq!(Target::resolve(Some(" client ")), Target::Boss);
    }

    #[test]
    fn test_prompts_are_distinct() {
        let prompts: std::collections::HashSet<_> =
            Target::ALL.iter().map(|t| t.system_prompt()).collect();
        assert_eq!(prompts.len(), 3);
    }

    #[test]
    fn test_prompt_register() {
        assert!(Target::Boss.system_prompt().contains("boss"));
        assert!(Target::Colleague.system_prompt().contains("colleague"));
        assert!(Target::Client.system_prompt().contains("customer"));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Target::Colleague).unwrap(), "\"colleague\"");
        for target in Target::ALL {
            assert_eq!(target.to_string(), target.as_str());
        }
    }
}
