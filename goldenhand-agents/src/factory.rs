use crate::error::AgentError;
use crate::registry::{AgentRegistry, SubjectAgent};
use crate::types::Subject;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves subjects to agent instances.
///
/// Routing is data, not code: a subject or alias maps to an agent key, and
/// new aliases can be routed at runtime without touching any agent.
/// Instances are cached by key for the process lifetime, so every alias of
/// a subject observes the same instance.
pub struct AgentFactory {
    registry: Arc<AgentRegistry>,
    routes: RwLock<HashMap<Subject, String>>,
    instances: DashMap<String, Arc<dyn SubjectAgent>>,
}

impl AgentFactory {
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        AgentFactory {
            registry,
            routes: RwLock::new(HashMap::new()),
            instances: DashMap::new(),
        }
    }

    /// Route a subject (or alias) to an agent key. Last write wins.
    pub fn route_subject(&self, subject: Subject, key: impl Into<String>) {
        let key = key.into();
        log::debug!("[FACTORY] Routing subject '{}' to '{}'", subject, key);
        self.routes.write().insert(subject, key);
    }

    /// Agent key routed for a subject.
    pub fn key_for_subject(&self, subject: &Subject) -> Result<String, AgentError> {
        self.routes
            .read()
            .get(subject)
            .cloned()
            .ok_or_else(|| AgentError::UnsupportedSubject(subject.to_string()))
    }

    /// Resolve the agent serving a subject, constructing it on first use.
    pub fn agent_for_subject(&self, subject: &Subject) -> Result<Arc<dyn SubjectAgent>, AgentError> {
        let key = self.key_for_subject(subject)?;
        self.agent_for_key(&key)
    }

    /// Resolve an agent by registry key, constructing it on first use.
    /// Concurrent first requests may both construct, but the entry API
    /// publishes a single instance and the loser is dropped.
    pub fn agent_for_key(&self, key: &str) -> Result<Arc<dyn SubjectAgent>, AgentError> {
        if let Some(agent) = self.instances.get(key) {
            return Ok(agent.value().clone());
        }
        let agent = self.registry.construct(key)?;
        log::info!("[FACTORY] Constructed agent '{}'", key);
        let agent = self
            .instances
            .entry(key.to_string())
            .or_insert(agent)
            .value()
            .clone();
        Ok(agent)
    }

    /// Subjects currently routed to a key, sorted for stable output.
    pub fn subjects_for_key(&self, key: &str) -> Vec<Subject> {
        let mut subjects: Vec<Subject> = self
            .routes
            .read()
            .iter()
            .filter(|(_, routed)| routed.as_str() == key)
            .map(|(subject, _)| subject.clone())
            .collect();
        subjects.sort();
        subjects
    }
}
