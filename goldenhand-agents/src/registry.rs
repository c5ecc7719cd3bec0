use crate::error::AgentError;
use crate::types::{
    ContentType, Difficulty, EntrepreneurshipConnection, GeneratedContent, GradeLevel,
    LearningStyle, PathSegment, PerformanceAnalysis, PerformanceRecord, QuestionContext,
    QuestionResponse, Resource, Subject,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Constructor registered for an agent key. Must be side-effect free: the
/// factory may run it more than once under a race but only one instance is
/// ever published.
pub type AgentConstructor = fn() -> Arc<dyn SubjectAgent>;

/// Contract every subject agent implements. All operations are synchronous,
/// deterministic for a fixed input, and free of I/O, so agents are safe to
/// share across request handlers behind an `Arc`.
pub trait SubjectAgent: Send + Sync + std::fmt::Debug {
    /// Canonical subject this agent serves.
    fn subject(&self) -> Subject;

    /// Human-readable agent name, e.g. "Mathematics Navigator".
    fn name(&self) -> &str;

    /// Short capability description for discovery endpoints.
    fn description(&self) -> &str;

    /// Grade-appropriate path segments, ordered by recommended difficulty.
    /// Topics the student has already mastered come back as review
    /// segments rather than being dropped.
    fn path_segments(
        &self,
        grade_level: GradeLevel,
        prior_knowledge: &HashMap<String, f64>,
    ) -> Result<Vec<PathSegment>, AgentError>;

    /// Synthesize study content for a topic inside this agent's taxonomy.
    fn generate_content(
        &self,
        topic: &str,
        content_type: ContentType,
        difficulty: Difficulty,
        grade_level: GradeLevel,
    ) -> Result<GeneratedContent, AgentError>;

    /// Deterministic analysis of a scored activity record.
    fn analyze_performance(
        &self,
        record: &PerformanceRecord,
    ) -> Result<PerformanceAnalysis, AgentError>;

    /// Best-effort answer with a confidence in [0, 1]. Never fails for
    /// off-taxonomy questions; it answers generically at low confidence.
    fn answer_question(
        &self,
        question: &str,
        context: &QuestionContext,
    ) -> Result<QuestionResponse, AgentError>;

    /// Curated resources for a topic, ranked by style and difficulty fit.
    fn suggest_resources(
        &self,
        topic: &str,
        learning_style: Option<LearningStyle>,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Resource>, AgentError>;

    /// Band-gated mapping from a topic to business practice.
    fn entrepreneurship_connection(
        &self,
        topic: &str,
        grade_level: GradeLevel,
    ) -> Result<EntrepreneurshipConnection, AgentError>;
}

struct RegistryInner {
    constructors: HashMap<String, AgentConstructor>,
    /// First-registration order. Drives fan-out tie-breaks, so it is
    /// tracked explicitly instead of relying on map iteration order.
    order: Vec<String>,
}

/// Registry mapping agent keys to constructors.
///
/// Interior mutability keeps registration ergonomic behind shared
/// references: callers can add agents at runtime without `&mut self`.
/// Construction is the factory's job; the registry only stores recipes.
pub struct AgentRegistry {
    inner: RwLock<RegistryInner>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        AgentRegistry {
            inner: RwLock::new(RegistryInner {
                constructors: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }

    /// Register a constructor under a key. Last write wins; re-registering
    /// an existing key keeps its original slot in the registration order.
    pub fn register(&self, key: impl Into<String>, constructor: AgentConstructor) {
        let key = key.into();
        let mut inner = self.inner.write();
        if inner.constructors.insert(key.clone(), constructor).is_none() {
            log::debug!("[REGISTRY] Registered agent key '{}'", key);
            inner.order.push(key);
        } else {
            log::warn!("[REGISTRY] Replaced constructor for agent key '{}'", key);
        }
    }

    /// Run the constructor for a key. Returns a fresh instance each call;
    /// instance caching lives in the factory.
    pub fn construct(&self, key: &str) -> Result<Arc<dyn SubjectAgent>, AgentError> {
        let constructor = self
            .inner
            .read()
            .constructors
            .get(key)
            .copied()
            .ok_or_else(|| AgentError::UnknownAgentKey(key.to_string()))?;
        Ok(constructor())
    }

    /// Registered keys in first-registration order.
    pub fn keys(&self) -> Vec<String> {
        self.inner.read().order.clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().constructors.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().order.is_empty()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
