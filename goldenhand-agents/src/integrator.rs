//! Cross-agent orchestration.
//!
//! The integrator is the single entry point request handlers talk to. It
//! owns the registry and factory, routes subject-scoped operations to one
//! agent, fans subjectless questions out to all of them, and assembles
//! multi-subject learning paths with an interdisciplinary capstone.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::agents::{self, DEFAULT_SUBJECT_ROUTES};
use crate::error::AgentError;
use crate::factory::AgentFactory;
use crate::registry::AgentRegistry;
use crate::types::{
    AgentInfo, Answer, ContentRequest, Difficulty, EntrepreneurshipConnection, GeneratedContent,
    GradeBand, GradeLevel, LearningPath, LearningStyle, PathSegment, PerformanceAnalysis,
    PerformanceRecord, QuestionContext, Resource, SegmentKind, Subject,
};

/// Most subjects one learning path will interleave.
pub const MAX_SUBJECTS: usize = 10;

const CAPSTONE_MINUTES: u32 = 180;
/// Two study hours per day drive the duration estimate.
const MINUTES_PER_DAY: f64 = 120.0;

pub struct AgentIntegrator {
    registry: Arc<AgentRegistry>,
    factory: AgentFactory,
    ready: OnceCell<()>,
}

impl AgentIntegrator {
    pub fn new() -> Self {
        let registry = Arc::new(AgentRegistry::new());
        let factory = AgentFactory::new(Arc::clone(&registry));
        AgentIntegrator {
            registry,
            factory,
            ready: OnceCell::new(),
        }
    }

    /// Registers the builtin agents and seeds the default subject routes.
    /// Safe to call more than once; only the first call does work.
    pub fn initialize(&self) {
        self.ready.get_or_init(|| {
            agents::register_builtin_agents(&self.registry);
            for (subject, key) in DEFAULT_SUBJECT_ROUTES {
                self.factory.route_subject(Subject::new(subject), *key);
            }
            log::info!("[INTEGRATOR] Ready with agents: {:?}", self.registry.keys());
        });
    }

    fn ensure_ready(&self) -> Result<(), AgentError> {
        if self.ready.get().is_some() {
            Ok(())
        } else {
            Err(AgentError::NotInitialized)
        }
    }

    /// Extension point: register additional agents here, then route their
    /// subjects via [`AgentIntegrator::factory`].
    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn factory(&self) -> &AgentFactory {
        &self.factory
    }

    /// Builds a combined learning path across up to [`MAX_SUBJECTS`]
    /// subjects. Per-subject segments are interleaved round-robin so a
    /// student alternates subjects instead of finishing one before
    /// starting the next. Two or more distinct subjects earn a single
    /// interdisciplinary capstone at the end.
    pub fn generate_learning_path(
        &self,
        student_id: i64,
        grade_level: GradeLevel,
        subjects: &[Subject],
        prior_knowledge: &HashMap<String, HashMap<String, f64>>,
    ) -> Result<LearningPath, AgentError> {
        self.ensure_ready()?;

        if subjects.len() > MAX_SUBJECTS {
            return Err(AgentError::TooManySubjects {
                requested: subjects.len(),
                max: MAX_SUBJECTS,
            });
        }

        let mut seen = HashSet::new();
        let mut requested: Vec<Subject> = Vec::new();
        for subject in subjects {
            if seen.insert(subject.clone()) {
                requested.push(subject.clone());
            }
        }

        let prior_by_subject: HashMap<Subject, &HashMap<String, f64>> = prior_knowledge
            .iter()
            .map(|(name, topics)| (Subject::new(name), topics))
            .collect();
        let no_prior = HashMap::new();

        let mut per_subject: Vec<Vec<PathSegment>> = Vec::with_capacity(requested.len());
        for subject in &requested {
            let agent = self.factory.agent_for_subject(subject)?;
            let prior = prior_by_subject.get(subject).copied().unwrap_or(&no_prior);
            let mut segments = agent.path_segments(grade_level, prior)?;
            // Segments carry the subject as requested, not the agent's
            // canonical one, so alias requests read back unchanged.
            for segment in &mut segments {
                segment.subjects = vec![subject.clone()];
            }
            per_subject.push(segments);
        }

        let mut segments = Vec::new();
        let mut cursor = 0;
        loop {
            let mut emitted = false;
            for list in &per_subject {
                if let Some(segment) = list.get(cursor) {
                    segments.push(segment.clone());
                    emitted = true;
                }
            }
            if !emitted {
                break;
            }
            cursor += 1;
        }

        if requested.len() >= 2 {
            segments.push(self.capstone_segment(&requested, grade_level)?);
        }

        let total_minutes: u32 = segments.iter().map(|segment| segment.estimated_minutes).sum();
        let estimated_duration_days = (f64::from(total_minutes) / MINUTES_PER_DAY).round() as u32;

        log::debug!(
            "[INTEGRATOR] Built path for student {} across {} subjects ({} segments, ~{} days)",
            student_id,
            requested.len(),
            segments.len(),
            estimated_duration_days
        );

        Ok(LearningPath {
            student_id,
            grade_level,
            subjects: requested,
            segments,
            estimated_duration_days,
        })
    }

    /// One interdisciplinary segment closing a multi-subject path. The
    /// topic comes from a pairing table over the canonical subjects; the
    /// entrepreneurship angle scales with the grade band.
    fn capstone_segment(
        &self,
        requested: &[Subject],
        grade_level: GradeLevel,
    ) -> Result<PathSegment, AgentError> {
        let mut canonical: Vec<Subject> = Vec::new();
        for subject in requested {
            let agent = self.factory.agent_for_subject(subject)?;
            let resolved = agent.subject();
            if !canonical.contains(&resolved) {
                canonical.push(resolved);
            }
        }

        let has = |name: &str| canonical.iter().any(|subject| subject.as_str() == name);
        let (topic, description) = if has("mathematics") && has("technology") {
            (
                "Data-Driven Solution",
                "Use mathematical analysis and technology implementation to create a data-driven application.",
            )
        } else if has("science") && has("technology") {
            (
                "Scientific Innovation",
                "Apply scientific principles and technology skills to develop an innovative solution to an environmental or health challenge.",
            )
        } else if has("mathematics") && has("science") {
            (
                "Scientific Modeling",
                "Use mathematical models to analyze and predict scientific phenomena.",
            )
        } else {
            (
                "Cross-Domain Innovation",
                "Combine knowledge from different domains to create an innovative solution to a community challenge.",
            )
        };

        let angle = match grade_level.band() {
            GradeBand::Lower => {
                "Finish by showing how your solution could help someone at school or at home."
            }
            GradeBand::Middle => {
                "Pitch a business idea that uses what you built to serve your school or community."
            }
            GradeBand::Upper => {
                "Then develop a business idea that leverages your knowledge across multiple subjects to solve a real problem in your community."
            }
        };

        Ok(PathSegment {
            subjects: canonical,
            topic: topic.to_string(),
            recommended_difficulty: Difficulty::Intermediate,
            kind: SegmentKind::Capstone,
            rationale: format!(
                "Apply concepts from multiple subjects to solve a real-world problem: {} {}",
                description, angle
            ),
            estimated_minutes: CAPSTONE_MINUTES,
        })
    }

    /// Generates content and attaches the producing agent's
    /// entrepreneurship connection. The attachment is integrator policy:
    /// every piece of content leaves here with a business angle.
    pub fn generate_content(
        &self,
        request: &ContentRequest,
    ) -> Result<GeneratedContent, AgentError> {
        self.ensure_ready()?;
        let agent = self.factory.agent_for_subject(&request.subject)?;
        let mut content = agent.generate_content(
            &request.topic,
            request.content_type,
            request.difficulty,
            request.grade_level,
        )?;
        let connection = agent.entrepreneurship_connection(&content.topic, request.grade_level)?;
        content.subject = request.subject.clone();
        content.entrepreneurship_connection = Some(connection);
        Ok(content)
    }

    pub fn analyze_performance(
        &self,
        record: &PerformanceRecord,
    ) -> Result<PerformanceAnalysis, AgentError> {
        self.ensure_ready()?;
        let agent = self.factory.agent_for_subject(&record.subject)?;
        agent.analyze_performance(record)
    }

    /// Answers a question. With a subject the request routes directly and
    /// routing errors propagate. Without one, every registered agent is
    /// asked and the most confident answer wins; individual agent failures
    /// are logged and skipped. Strict comparison means ties go to the
    /// earliest-registered agent.
    pub fn answer_question(
        &self,
        question: &str,
        subject: Option<&Subject>,
        context: &QuestionContext,
    ) -> Result<Answer, AgentError> {
        self.ensure_ready()?;

        if let Some(subject) = subject {
            let key = self.factory.key_for_subject(subject)?;
            let agent = self.factory.agent_for_key(&key)?;
            let response = agent.answer_question(question, context)?;
            return Ok(Answer {
                text: response.text,
                subject: subject.clone(),
                confidence: response.confidence,
                source_agent: key,
            });
        }

        let mut best: Option<Answer> = None;
        for key in self.registry.keys() {
            let agent = match self.factory.agent_for_key(&key) {
                Ok(agent) => agent,
                Err(err) => {
                    log::warn!("[INTEGRATOR] Skipping agent '{}': {}", key, err);
                    continue;
                }
            };
            match agent.answer_question(question, context) {
                Ok(response) => {
                    let better = best
                        .as_ref()
                        .map_or(true, |current| response.confidence > current.confidence);
                    if better {
                        best = Some(Answer {
                            text: response.text,
                            subject: agent.subject(),
                            confidence: response.confidence,
                            source_agent: key,
                        });
                    }
                }
                Err(err) => {
                    log::warn!("[INTEGRATOR] Agent '{}' failed to answer: {}", key, err);
                }
            }
        }

        best.ok_or(AgentError::NoAnswerAvailable)
    }

    pub fn suggest_resources(
        &self,
        subject: &Subject,
        topic: &str,
        learning_style: Option<LearningStyle>,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Resource>, AgentError> {
        self.ensure_ready()?;
        let agent = self.factory.agent_for_subject(subject)?;
        agent.suggest_resources(topic, learning_style, difficulty)
    }

    pub fn entrepreneurship_connection(
        &self,
        subject: &Subject,
        topic: &str,
        grade_level: GradeLevel,
    ) -> Result<EntrepreneurshipConnection, AgentError> {
        self.ensure_ready()?;
        let agent = self.factory.agent_for_subject(subject)?;
        let mut connection = agent.entrepreneurship_connection(topic, grade_level)?;
        connection.subject = subject.clone();
        Ok(connection)
    }

    /// Discovery listing in registration order, with the subjects each
    /// agent is currently routed for.
    pub fn agent_info(&self) -> Result<Vec<AgentInfo>, AgentError> {
        self.ensure_ready()?;
        let mut infos = Vec::new();
        for key in self.registry.keys() {
            let agent = self.factory.agent_for_key(&key)?;
            infos.push(AgentInfo {
                key: key.clone(),
                name: agent.name().to_string(),
                description: agent.description().to_string(),
                subjects: self.factory.subjects_for_key(&key),
            });
        }
        Ok(infos)
    }
}

impl Default for AgentIntegrator {
    fn default() -> Self {
        Self::new()
    }
}
