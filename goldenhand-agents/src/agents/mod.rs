//! Builtin subject agents.
//!
//! Each agent is a thin wrapper around a static profile: the grade
//! ladders, question rules, resource catalog and entrepreneurship
//! connections that make the subject what it is. The shared behavior
//! lives in [`common`] so a new subject is mostly a data exercise.

mod common;

pub mod mathematics;
pub mod science;
pub mod technology;

use crate::registry::AgentRegistry;

/// Registry key for the builtin mathematics agent.
pub const MATHEMATICS_AGENT_KEY: &str = "mathematics_agent";
/// Registry key for the builtin science agent.
pub const SCIENCE_AGENT_KEY: &str = "science_agent";
/// Registry key for the builtin technology agent.
pub const TECHNOLOGY_AGENT_KEY: &str = "technology_agent";

/// Subject aliases the integrator seeds into the factory on startup.
/// Every alias routes to one of the builtin agent keys.
pub const DEFAULT_SUBJECT_ROUTES: &[(&str, &str)] = &[
    ("mathematics", MATHEMATICS_AGENT_KEY),
    ("math", MATHEMATICS_AGENT_KEY),
    ("algebra", MATHEMATICS_AGENT_KEY),
    ("calculus", MATHEMATICS_AGENT_KEY),
    ("geometry", MATHEMATICS_AGENT_KEY),
    ("science", SCIENCE_AGENT_KEY),
    ("biology", SCIENCE_AGENT_KEY),
    ("chemistry", SCIENCE_AGENT_KEY),
    ("physics", SCIENCE_AGENT_KEY),
    ("technology", TECHNOLOGY_AGENT_KEY),
    ("computer science", TECHNOLOGY_AGENT_KEY),
    ("programming", TECHNOLOGY_AGENT_KEY),
    ("coding", TECHNOLOGY_AGENT_KEY),
    ("web development", TECHNOLOGY_AGENT_KEY),
    ("app development", TECHNOLOGY_AGENT_KEY),
];

/// Registers the three builtin agents under their well-known keys.
pub fn register_builtin_agents(registry: &AgentRegistry) {
    registry.register(MATHEMATICS_AGENT_KEY, mathematics::construct);
    registry.register(SCIENCE_AGENT_KEY, science::construct);
    registry.register(TECHNOLOGY_AGENT_KEY, technology::construct);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registration_order() {
        let registry = AgentRegistry::new();
        register_builtin_agents(&registry);
        assert_eq!(
            registry.keys(),
            vec![
                MATHEMATICS_AGENT_KEY.to_string(),
                SCIENCE_AGENT_KEY.to_string(),
                TECHNOLOGY_AGENT_KEY.to_string(),
            ]
        );
    }

    #[test]
    fn test_every_route_targets_a_builtin() {
        let registry = AgentRegistry::new();
        register_builtin_agents(&registry);
        for (subject, key) in DEFAULT_SUBJECT_ROUTES {
            assert!(registry.contains(key), "route for '{}' is dangling", subject);
        }
    }
}
