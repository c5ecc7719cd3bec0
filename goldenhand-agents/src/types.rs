use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use strum::{Display, EnumIter, EnumString};

// ===== Subjects and grades =====

/// Canonical subject identifier, normalized to trimmed lowercase on
/// construction and deserialization so "Mathematics" and "mathematics"
/// route identically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Subject(String);

impl Subject {
    pub fn new(name: impl AsRef<str>) -> Self {
        Subject(name.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Subject {
    fn from(name: String) -> Self {
        Subject::new(name)
    }
}

impl From<&str> for Subject {
    fn from(name: &str) -> Self {
        Subject::new(name)
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> String {
        subject.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// School grade 1-12 or post-school tertiary. On the wire a grade is a bare
/// number and tertiary is the string "tertiary"; anything else is rejected
/// at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GradeLevelRepr", into = "GradeLevelRepr")]
pub enum GradeLevel {
    Grade(u8),
    /// Studies the grade-12 ladder with adult framing.
    Tertiary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum GradeLevelRepr {
    Number(u8),
    Label(String),
}

impl TryFrom<GradeLevelRepr> for GradeLevel {
    type Error = String;

    fn try_from(repr: GradeLevelRepr) -> Result<Self, Self::Error> {
        match repr {
            GradeLevelRepr::Number(n) if (1..=12).contains(&n) => Ok(GradeLevel::Grade(n)),
            GradeLevelRepr::Number(n) => Err(format!("grade level must be 1-12, got {}", n)),
            GradeLevelRepr::Label(label) if label.eq_ignore_ascii_case("tertiary") => {
                Ok(GradeLevel::Tertiary)
            }
            GradeLevelRepr::Label(label) => Err(format!("unknown grade level '{}'", label)),
        }
    }
}

impl From<GradeLevel> for GradeLevelRepr {
    fn from(level: GradeLevel) -> Self {
        match level {
            GradeLevel::Grade(n) => GradeLevelRepr::Number(n),
            GradeLevel::Tertiary => GradeLevelRepr::Label("tertiary".to_string()),
        }
    }
}

impl GradeLevel {
    /// Validated constructor for school grades.
    pub fn grade(n: u8) -> Option<Self> {
        (1..=12).contains(&n).then_some(GradeLevel::Grade(n))
    }

    /// Band used to gate narrative vocabulary and business-example scale.
    pub fn band(&self) -> GradeBand {
        match self {
            GradeLevel::Grade(n) if *n <= 6 => GradeBand::Lower,
            GradeLevel::Grade(n) if *n <= 9 => GradeBand::Middle,
            _ => GradeBand::Upper,
        }
    }

    /// Index into the per-grade topic ladders. Tertiary studies the
    /// grade-12 ladder. Clamped so an out-of-range grade built without the
    /// validated constructor cannot index past the ladder.
    pub fn ladder_index(&self) -> usize {
        match self {
            GradeLevel::Grade(n) => (n.saturating_sub(1)).min(11) as usize,
            GradeLevel::Tertiary => 11,
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeLevel::Grade(n) => write!(f, "grade {}", n),
            GradeLevel::Tertiary => f.write_str("tertiary"),
        }
    }
}

/// Coarse grade banding for narrative gating: lower (1-6), middle (7-9),
/// upper (10-12 and tertiary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeBand {
    Lower,
    Middle,
    Upper,
}

// ===== Difficulty and content =====

/// Ordered difficulty ladder. The derive order gives `Ord`, so
/// `Beginner < Intermediate < Advanced` holds for path sorting.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentType {
    Lesson,
    Exercise,
    Quiz,
    Project,
}

impl ContentType {
    /// Capitalized label for titles ("Algebra - Lesson").
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Lesson => "Lesson",
            ContentType::Exercise => "Exercise",
            ContentType::Quiz => "Quiz",
            ContentType::Project => "Project",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Kinesthetic,
}

/// Fully resolved content request handed to an agent. Defaulting of the
/// optional wire fields happens at the API boundary, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    pub subject: Subject,
    pub topic: String,
    pub content_type: ContentType,
    pub difficulty: Difficulty,
    pub grade_level: GradeLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub difficulty: Difficulty,
    pub grade_level: GradeLevel,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub subject: Subject,
    pub topic: String,
    pub content_type: ContentType,
    pub title: String,
    /// Markdown body shaped by content type (objectives and summary for
    /// lessons, numbered problems for exercises, and so on).
    pub body: String,
    /// Attached by the integrator, never by the agent itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrepreneurship_connection: Option<EntrepreneurshipConnection>,
    pub metadata: ContentMetadata,
}

// ===== Learning paths =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Study,
    /// Mastered topics stay on the path as review, never dropped.
    Review,
    /// Interdisciplinary closer, present exactly once when two or more
    /// subjects were requested.
    Capstone,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSegment {
    pub subjects: Vec<Subject>,
    pub topic: String,
    pub recommended_difficulty: Difficulty,
    pub kind: SegmentKind,
    pub rationale: String,
    pub estimated_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPath {
    pub student_id: i64,
    pub grade_level: GradeLevel,
    /// Requested subjects after order-preserving dedup.
    pub subjects: Vec<Subject>,
    pub segments: Vec<PathSegment>,
    /// Total segment minutes at roughly two study hours per day.
    pub estimated_duration_days: u32,
}

// ===== Performance analysis =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub correct: bool,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub student_id: i64,
    pub subject: Subject,
    pub activity_type: String,
    pub topic: String,
    pub score: f64,
    pub max_score: f64,
    #[serde(default)]
    pub answers: Vec<QuestionOutcome>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Satisfactory,
    NeedsImprovement,
}

impl PerformanceLevel {
    /// Level from a normalized score in [0, 1].
    pub fn from_score(normalized: f64) -> Self {
        if normalized >= 0.9 {
            PerformanceLevel::Excellent
        } else if normalized >= 0.75 {
            PerformanceLevel::Good
        } else if normalized >= 0.6 {
            PerformanceLevel::Satisfactory
        } else {
            PerformanceLevel::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "Excellent",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Satisfactory => "Satisfactory",
            PerformanceLevel::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Deterministic analysis of one activity record. Strengths and weaknesses
/// are sets ordered by category name so repeated runs serialize identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceAnalysis {
    pub student_id: i64,
    pub subject: Subject,
    pub topic: String,
    pub activity_type: String,
    pub normalized_score: f64,
    pub performance_level: PerformanceLevel,
    pub strengths: BTreeSet<String>,
    pub weaknesses: BTreeSet<String>,
    pub feedback: String,
    pub recommendations: Vec<String>,
}

// ===== Question answering =====

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionContext {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub grade_level: Option<GradeLevel>,
}

/// Raw agent response before the integrator stamps provenance onto it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub text: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub subject: Subject,
    pub confidence: f64,
    /// Registry key of the agent that produced the text.
    pub source_agent: String,
}

// ===== Resources =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Interactive,
    Tutorial,
    Course,
    Tool,
    Simulation,
    Audio,
    Video,
    Activity,
    Project,
    Article,
    Community,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub description: String,
    pub url: String,
    pub kind: ResourceKind,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_style: Option<LearningStyle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

// ===== Entrepreneurship =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrepreneurshipConnection {
    pub subject: Subject,
    pub topic: String,
    pub grade_level: GradeLevel,
    /// Band-gated prose: lower grades get simpler language and
    /// smaller-scale business examples.
    pub narrative: String,
    pub example_business_applications: Vec<String>,
}

// ===== Agent metadata =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub key: String,
    pub name: String,
    pub description: String,
    /// Subjects currently routed to this agent, sorted for stable output.
    pub subjects: Vec<Subject>,
}
