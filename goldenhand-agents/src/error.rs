use std::fmt;

/// Error taxonomy for the agent orchestration layer.
///
/// Agents raise the narrowest applicable variant; the integrator propagates
/// them unchanged except during question fan-out, where individual agent
/// failures are skipped and only an all-agents failure surfaces as
/// `NoAnswerAvailable`.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentError {
    /// The integrator was used before `initialize()` ran. A wiring defect:
    /// production deployments initialize eagerly at startup.
    NotInitialized,
    /// No constructor is registered under the requested agent key.
    UnknownAgentKey(String),
    /// No agent key is routed for the requested subject.
    UnsupportedSubject(String),
    /// The topic matches nothing in the resolved agent's taxonomy.
    UnsupportedTopic { subject: String, topic: String },
    /// The content type string is not one of the supported variants.
    UnsupportedContentType(String),
    /// The activity record failed validation (negative, inverted, or
    /// non-finite scores).
    InvalidActivityRecord(String),
    /// A learning-path request named more subjects than the fan-out cap.
    TooManySubjects { requested: usize, max: usize },
    /// Every registered agent failed during question fan-out.
    NoAnswerAvailable,
}

impl AgentError {
    /// Stable machine-readable tag used in API error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentError::NotInitialized => "not_initialized",
            AgentError::UnknownAgentKey(_) => "unknown_agent_key",
            AgentError::UnsupportedSubject(_) => "unsupported_subject",
            AgentError::UnsupportedTopic { .. } => "unsupported_topic",
            AgentError::UnsupportedContentType(_) => "unsupported_content_type",
            AgentError::InvalidActivityRecord(_) => "invalid_activity_record",
            AgentError::TooManySubjects { .. } => "too_many_subjects",
            AgentError::NoAnswerAvailable => "no_answer_available",
        }
    }

    /// Whether the caller can recover by fixing the request.
    /// `NotInitialized` is a deployment defect and `NoAnswerAvailable` means
    /// every agent failed, so neither is client-recoverable.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            AgentError::NotInitialized | AgentError::NoAnswerAvailable
        )
    }
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::NotInitialized => {
                write!(f, "agent integrator has not been initialized")
            }
            AgentError::UnknownAgentKey(key) => {
                write!(f, "no agent registered under key '{}'", key)
            }
            AgentError::UnsupportedSubject(subject) => {
                write!(f, "no agent available for subject '{}'", subject)
            }
            AgentError::UnsupportedTopic { subject, topic } => {
                write!(f, "topic '{}' is outside the {} taxonomy", topic, subject)
            }
            AgentError::UnsupportedContentType(value) => {
                write!(f, "unsupported content type '{}'", value)
            }
            AgentError::InvalidActivityRecord(reason) => {
                write!(f, "invalid activity record: {}", reason)
            }
            AgentError::TooManySubjects { requested, max } => {
                write!(f, "{} subjects requested, maximum is {}", requested, max)
            }
            AgentError::NoAnswerAvailable => {
                write!(f, "no agent could answer the question")
            }
        }
    }
}

impl std::error::Error for AgentError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_are_snake_case() {
        let errors = vec![
            AgentError::NotInitialized,
            AgentError::UnknownAgentKey("x".to_string()),
            AgentError::UnsupportedSubject("history".to_string()),
            AgentError::UnsupportedTopic {
                subject: "mathematics".to_string(),
                topic: "Photosynthesis".to_string(),
            },
            AgentError::UnsupportedContentType("assessment".to_string()),
            AgentError::InvalidActivityRecord("score exceeds max_score".to_string()),
            AgentError::TooManySubjects {
                requested: 11,
                max: 10,
            },
            AgentError::NoAnswerAvailable,
        ];

        for err in errors {
            let kind = err.kind();
            assert!(!kind.is_empty());
            assert!(
                kind.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "kind '{}' is not snake_case",
                kind
            );
        }
    }

    #[test]
    fn test_client_error_classification() {
        assert!(!AgentError::NotInitialized.is_client_error());
        assert!(!AgentError::NoAnswerAvailable.is_client_error());
        assert!(AgentError::UnsupportedSubject("history".to_string()).is_client_error());
        assert!(
            AgentError::TooManySubjects {
                requested: 11,
                max: 10
            }
            .is_client_error()
        );
    }

    #[test]
    fn test_display_includes_offending_value() {
        let err = AgentError::UnsupportedTopic {
            subject: "mathematics".to_string(),
            topic: "Photosynthesis".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Photosynthesis"));
        assert!(message.contains("mathematics"));
    }
}
