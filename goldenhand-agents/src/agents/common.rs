//! Shared synthesis engine for the builtin agents.
//!
//! Agents differ in data, not structure: each one owns a static
//! [`AgentProfile`] (taxonomy, answer rules, resource catalog and
//! entrepreneurship tables) and delegates behavior to the functions here.

use crate::error::AgentError;
use crate::types::{
    ContentMetadata, ContentType, Difficulty, EntrepreneurshipConnection, GeneratedContent,
    GradeBand, GradeLevel, LearningStyle, PathSegment, PerformanceAnalysis, PerformanceLevel,
    PerformanceRecord, QuestionContext, QuestionResponse, Resource, ResourceKind, SegmentKind,
    Subject,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Proficiency at or above this marks a topic as mastered: it stays on the
/// learning path as a review segment instead of being dropped.
pub(crate) const MASTERY_THRESHOLD: f64 = 0.75;
/// Per-category accuracy bounds for strength and weakness classification.
const STRENGTH_THRESHOLD: f64 = 0.8;
const WEAKNESS_THRESHOLD: f64 = 0.5;

const REVIEW_MINUTES: u32 = 20;

/// Confidence scoring. Rule hits set the base, distinct question tokens
/// found in the agent's vocabulary add a small bonus, and the total never
/// exceeds the cap because these answers are rule lookups, not reasoning.
const GENERIC_CONFIDENCE: f64 = 0.2;
const BUSINESS_CONFIDENCE: f64 = 0.7;
const VOCABULARY_BONUS: f64 = 0.05;
const MAX_VOCABULARY_BONUS: f64 = 0.2;
pub(crate) const MAX_CONFIDENCE: f64 = 0.9;

const QUIZ_QUESTION_COUNT: usize = 10;
const QUIZ_PASS_MARK: usize = 7;
const QUIZ_TIME_LIMIT_MINUTES: usize = 15;

/// Entrepreneurship questions are platform policy, shared by every agent.
/// Subject rules are scanned first so domain answers take precedence.
const BUSINESS_KEYWORDS: [&str; 4] = ["business", "entrepreneur", "entrepreneurship", "startup"];

/// Words too generic to signal subject overlap.
const STOPWORDS: [&str; 11] = [
    "and",
    "the",
    "for",
    "with",
    "intro",
    "introduction",
    "basic",
    "basics",
    "advanced",
    "simple",
    "fundamentals",
];

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z][a-z0-9'-]*").expect("word pattern must compile"));

// ===== Profile data model =====

/// Static description of one subject agent.
pub(crate) struct AgentProfile {
    pub subject: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Topics per grade, index 0 = grade 1. Tertiary reuses grade 12.
    pub topics_by_grade: [&'static [&'static str]; 12],
    /// Topic-fragment to category table, first match wins. Fragments are
    /// lowercase; matching is containment on the lowered topic.
    pub categories: &'static [(&'static str, &'static str)],
    /// Keyword rules scanned in order; the first rule with any hit answers.
    pub qa_rules: &'static [QaRule],
    /// Fallback answer when nothing matches.
    pub generic_answer: &'static str,
    /// Practice framing folded into study segment rationales.
    pub practice_note: &'static str,
    /// Project scenario template; `{topic}` is substituted.
    pub project_scenario: &'static str,
    /// Subject-specific first rubric criterion.
    pub rubric_focus: &'static str,
    /// Estimated minutes for one study segment of this subject.
    pub segment_minutes: u32,
    /// Ordered resource catalog; earlier entries win ranking ties.
    pub catalog: &'static [CatalogEntry],
    /// Entrepreneurship connections keyed by topic fragments.
    pub connections: &'static [ConnectionEntry],
    /// Used when the topic matches no connection entry.
    pub default_connection: ConnectionSpec,
}

pub(crate) struct QaRule {
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
    pub confidence: f64,
}

pub(crate) struct CatalogEntry {
    /// Title and description may carry a `{topic}` placeholder.
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub kind: ResourceKind,
    pub difficulty: Difficulty,
    pub learning_style: Option<LearningStyle>,
    /// Topic categories this entry targets; empty applies to any topic.
    pub categories: &'static [&'static str],
    pub tags: &'static [&'static str],
}

pub(crate) struct ConnectionEntry {
    /// Lowercase topic fragments matched against the requested topic.
    pub topics: &'static [&'static str],
    pub spec: ConnectionSpec,
}

/// Narrative and business examples per grade band, indexed
/// lower / middle / upper.
pub(crate) struct ConnectionSpec {
    pub narratives: [&'static str; 3],
    pub applications: [&'static [&'static str]; 3],
}

// ===== Taxonomy helpers =====

/// Resolve a requested topic against the grade ladders. Matching is
/// case-insensitive containment in either direction, so "Algebra" finds
/// "Algebra II" and "Intro to Algebra" finds "Algebra".
pub(crate) fn resolve_topic(profile: &AgentProfile, topic: &str) -> Option<&'static str> {
    let needle = topic.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    for grade in &profile.topics_by_grade {
        for candidate in *grade {
            let hay = candidate.to_lowercase();
            if hay.contains(&needle) || needle.contains(&hay) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Category for a topic, "general" when no fragment matches.
pub(crate) fn categorize(profile: &AgentProfile, topic: &str) -> &'static str {
    let lowered = topic.to_lowercase();
    for (fragment, category) in profile.categories {
        if lowered.contains(fragment) {
            return category;
        }
    }
    "general"
}

/// Lowercase word tokens of a free-text question.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Vocabulary an agent recognizes, built once per instance from its ladder
/// topics and category table.
pub(crate) fn build_vocabulary(profile: &AgentProfile) -> HashSet<String> {
    let mut vocabulary = HashSet::new();
    let mut add_words = |text: &str| {
        for word in text.split(|c: char| !c.is_ascii_alphanumeric()) {
            let word = word.to_lowercase();
            if word.len() >= 3 && !STOPWORDS.contains(&word.as_str()) {
                vocabulary.insert(word);
            }
        }
    };
    add_words(profile.subject);
    for grade in &profile.topics_by_grade {
        for topic in *grade {
            add_words(topic);
        }
    }
    for (fragment, category) in profile.categories {
        add_words(fragment);
        add_words(category);
    }
    vocabulary
}

pub(crate) fn difficulty_for_proficiency(proficiency: f64) -> Difficulty {
    if proficiency < 0.3 {
        Difficulty::Beginner
    } else if proficiency < 0.7 {
        Difficulty::Intermediate
    } else {
        Difficulty::Advanced
    }
}

// ===== Learning paths =====

/// One segment per ladder topic for the grade, ordered by recommended
/// difficulty (stable, so ladder order holds within a difficulty).
pub(crate) fn path_segments(
    profile: &AgentProfile,
    grade_level: GradeLevel,
    prior_knowledge: &HashMap<String, f64>,
) -> Vec<PathSegment> {
    let subject = Subject::new(profile.subject);
    let mut segments: Vec<PathSegment> = profile.topics_by_grade[grade_level.ladder_index()]
        .iter()
        .map(|topic| {
            let proficiency = prior_knowledge
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(topic))
                .map(|(_, value)| *value)
                .unwrap_or(0.0);
            if proficiency >= MASTERY_THRESHOLD {
                PathSegment {
                    subjects: vec![subject.clone()],
                    topic: (*topic).to_string(),
                    recommended_difficulty: Difficulty::Advanced,
                    kind: SegmentKind::Review,
                    rationale: format!(
                        "You have already mastered {}. Revisit it briefly to keep it sharp.",
                        topic
                    ),
                    estimated_minutes: REVIEW_MINUTES,
                }
            } else {
                let difficulty = difficulty_for_proficiency(proficiency);
                PathSegment {
                    subjects: vec![subject.clone()],
                    topic: (*topic).to_string(),
                    recommended_difficulty: difficulty,
                    kind: SegmentKind::Study,
                    rationale: format!(
                        "Learn {} at a {} level. {}",
                        topic, difficulty, profile.practice_note
                    ),
                    estimated_minutes: profile.segment_minutes,
                }
            }
        })
        .collect();

    segments.sort_by_key(|segment| segment.recommended_difficulty);
    segments
}

// ===== Content generation =====

pub(crate) fn generate_content(
    profile: &AgentProfile,
    topic: &str,
    content_type: ContentType,
    difficulty: Difficulty,
    grade_level: GradeLevel,
) -> Result<GeneratedContent, AgentError> {
    if resolve_topic(profile, topic).is_none() {
        return Err(AgentError::UnsupportedTopic {
            subject: profile.subject.to_string(),
            topic: topic.to_string(),
        });
    }

    let body = match content_type {
        ContentType::Lesson => render_lesson(profile, topic, difficulty, grade_level),
        ContentType::Exercise => render_exercise(topic, difficulty),
        ContentType::Quiz => render_quiz(topic, difficulty),
        ContentType::Project => render_project(profile, topic),
    };

    Ok(GeneratedContent {
        subject: Subject::new(profile.subject),
        topic: topic.to_string(),
        content_type,
        title: format!("{} - {}", topic, content_type.label()),
        body,
        entrepreneurship_connection: None,
        metadata: ContentMetadata {
            difficulty,
            grade_level,
            generated_at: Utc::now(),
        },
    })
}

pub(crate) fn problem_count(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Beginner => 5,
        Difficulty::Intermediate => 8,
        Difficulty::Advanced => 10,
    }
}

fn render_lesson(
    profile: &AgentProfile,
    topic: &str,
    difficulty: Difficulty,
    grade_level: GradeLevel,
) -> String {
    let connection = connection_for(profile, topic, grade_level);
    let mut body = String::new();
    body.push_str(&format!(
        "Welcome to this {} {} lesson on {}, written for {} students.\n",
        difficulty, profile.subject, topic, grade_level
    ));
    body.push_str("\n## Objectives\n");
    body.push_str(&format!("- Understand the core ideas behind {}\n", topic));
    body.push_str(&format!("- Apply {} to practical problems\n", topic));
    body.push_str(&format!("- Recognize where {} appears in working businesses\n", topic));
    body.push_str("\n## Key Concepts\n");
    body.push_str(&format!(
        "We build up {} step by step, with a worked example at each stage.\n",
        topic
    ));
    body.push_str("\n## Applications\n");
    body.push_str(&format!(
        "You will practice {} on problems drawn from everyday life in South Africa.\n",
        topic
    ));
    body.push_str("\n## Entrepreneurship Angle\n");
    body.push_str(&connection.narrative);
    body.push_str("\n\n## Summary\n");
    body.push_str(&format!(
        "By the end of this lesson you should be able to explain {} and point to one way a business puts it to work.\n",
        topic
    ));
    body
}

fn render_exercise(topic: &str, difficulty: Difficulty) -> String {
    let count = problem_count(difficulty);
    let mut body = String::new();
    body.push_str(&format!(
        "Practice set for {}. Work through each problem in order; hints unlock after your first attempt.\n\n",
        topic
    ));
    for i in 1..=count {
        body.push_str(&format!(
            "{}. {} practice problem {} ({} level)\n",
            i, topic, i, difficulty
        ));
    }
    body.push_str("\nOdd-numbered problems are multiple choice; the rest ask for a worked solution.\n");
    body
}

fn render_quiz(topic: &str, difficulty: Difficulty) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "Quiz on {} ({} level). {} questions, {} minutes, pass mark {} of {}.\n\n",
        topic,
        difficulty,
        QUIZ_QUESTION_COUNT,
        QUIZ_TIME_LIMIT_MINUTES,
        QUIZ_PASS_MARK,
        QUIZ_QUESTION_COUNT
    ));
    for i in 1..=QUIZ_QUESTION_COUNT {
        body.push_str(&format!("{}. Question {} on {}\n", i, i, topic));
    }
    body
}

fn render_project(profile: &AgentProfile, topic: &str) -> String {
    let mut body = String::new();
    body.push_str(&fill(profile.project_scenario, topic));
    body.push_str("\n\n## Tasks\n");
    body.push_str("1. Analyze the problem and document the requirements\n");
    body.push_str(&format!("2. Apply {} concepts to design your solution\n", topic));
    body.push_str("3. Build the solution and record the decisions you made\n");
    body.push_str("4. Present your findings and reflect on what you would improve\n");
    body.push_str("\n## Rubric\n");
    body.push_str(&format!("- {}: 30%\n", profile.rubric_focus));
    body.push_str("- Problem-solving approach: 25%\n");
    body.push_str("- Real-world applicability: 25%\n");
    body.push_str("- Presentation quality: 20%\n");
    body
}

fn fill(template: &str, topic: &str) -> String {
    template.replace("{topic}", topic)
}

// ===== Performance analysis =====

pub(crate) fn analyze_performance(
    record: &PerformanceRecord,
) -> Result<PerformanceAnalysis, AgentError> {
    if !record.score.is_finite() || !record.max_score.is_finite() {
        return Err(AgentError::InvalidActivityRecord(
            "scores must be finite".to_string(),
        ));
    }
    if record.score < 0.0 {
        return Err(AgentError::InvalidActivityRecord(
            "score must not be negative".to_string(),
        ));
    }
    if record.max_score <= 0.0 {
        return Err(AgentError::InvalidActivityRecord(
            "max_score must be positive".to_string(),
        ));
    }
    if record.score > record.max_score {
        return Err(AgentError::InvalidActivityRecord(
            "score exceeds max_score".to_string(),
        ));
    }

    let normalized = record.score / record.max_score;
    let level = PerformanceLevel::from_score(normalized);

    let mut per_category: HashMap<&str, (u32, u32)> = HashMap::new();
    for outcome in &record.answers {
        let entry = per_category.entry(outcome.category.as_str()).or_insert((0, 0));
        entry.1 += 1;
        if outcome.correct {
            entry.0 += 1;
        }
    }

    let mut strengths = BTreeSet::new();
    let mut weaknesses = BTreeSet::new();
    for (category, (correct, total)) in &per_category {
        let accuracy = f64::from(*correct) / f64::from(*total);
        if accuracy >= STRENGTH_THRESHOLD {
            strengths.insert((*category).to_string());
        } else if accuracy <= WEAKNESS_THRESHOLD {
            weaknesses.insert((*category).to_string());
        }
    }

    let mut recommendations: Vec<String> = base_recommendations(level)
        .iter()
        .map(|r| (*r).to_string())
        .collect();
    // Weaknesses come from a BTreeSet, so the order is stable.
    for weakness in &weaknesses {
        recommendations.push(format!("Schedule targeted practice for {}", weakness));
    }

    let feedback = format!(
        "You scored {:.1}% on this {}. {}.",
        normalized * 100.0,
        record.activity_type,
        level.label()
    );

    Ok(PerformanceAnalysis {
        student_id: record.student_id,
        subject: record.subject.clone(),
        topic: record.topic.clone(),
        activity_type: record.activity_type.clone(),
        normalized_score: normalized,
        performance_level: level,
        strengths,
        weaknesses,
        feedback,
        recommendations,
    })
}

fn base_recommendations(level: PerformanceLevel) -> &'static [&'static str] {
    match level {
        PerformanceLevel::Excellent => &[
            "Move on to more advanced topics",
            "Attempt extension problems for depth",
        ],
        PerformanceLevel::Good => &[
            "Review the areas that caused difficulty",
            "Practice with more varied examples",
        ],
        PerformanceLevel::Satisfactory => &[
            "Focus on the identified weaknesses",
            "Review the core concepts before moving on",
        ],
        PerformanceLevel::NeedsImprovement => &[
            "Revisit the fundamentals",
            "Work through simpler examples first",
        ],
    }
}

// ===== Question answering =====

/// Rule lookup with a vocabulary bonus. Never fails: off-taxonomy questions
/// get the generic answer at low confidence so fan-out can compare agents.
pub(crate) fn answer_question(
    profile: &AgentProfile,
    vocabulary: &HashSet<String>,
    question: &str,
    context: &QuestionContext,
) -> QuestionResponse {
    let lowered = question.to_lowercase();
    let tokens: HashSet<String> = tokenize(question).into_iter().collect();

    let overlap = tokens
        .iter()
        .filter(|token| vocabulary.contains(token.as_str()))
        .count();
    let bonus = (overlap as f64 * VOCABULARY_BONUS).min(MAX_VOCABULARY_BONUS);

    let matched = profile
        .qa_rules
        .iter()
        .find(|rule| rule.keywords.iter().any(|kw| keyword_hit(kw, &lowered, &tokens)));

    let (text, base) = if let Some(rule) = matched {
        (rule.answer.to_string(), rule.confidence)
    } else if BUSINESS_KEYWORDS.iter().any(|kw| keyword_hit(kw, &lowered, &tokens)) {
        let topic = context.topic.as_deref().unwrap_or(profile.subject);
        let grade = context.grade_level.unwrap_or(GradeLevel::Grade(10));
        let connection = connection_for(profile, topic, grade);
        (connection.narrative, BUSINESS_CONFIDENCE)
    } else {
        (profile.generic_answer.to_string(), GENERIC_CONFIDENCE)
    };

    QuestionResponse {
        text,
        confidence: (base + bonus).min(MAX_CONFIDENCE),
    }
}

fn keyword_hit(keyword: &str, lowered_question: &str, tokens: &HashSet<String>) -> bool {
    if keyword.contains(' ') {
        lowered_question.contains(keyword)
    } else {
        tokens.contains(keyword)
    }
}

// ===== Resources =====

/// Catalog entries surviving the topic filter, ranked by learning style
/// fit then difficulty fit. The sort is stable, so catalog order breaks
/// ties.
pub(crate) fn suggest_resources(
    profile: &AgentProfile,
    topic: &str,
    learning_style: Option<LearningStyle>,
    difficulty: Option<Difficulty>,
) -> Vec<Resource> {
    let category = categorize(profile, topic);
    let want_difficulty = difficulty.unwrap_or(Difficulty::Intermediate);

    let mut resources: Vec<Resource> = profile
        .catalog
        .iter()
        .filter(|entry| entry.categories.is_empty() || entry.categories.contains(&category))
        .map(|entry| Resource {
            title: fill(entry.title, topic),
            description: fill(entry.description, topic),
            url: entry.url.to_string(),
            kind: entry.kind,
            difficulty: entry.difficulty,
            learning_style: entry.learning_style,
            tags: entry.tags.iter().map(|tag| (*tag).to_string()).collect(),
        })
        .collect();

    resources.sort_by_key(|resource| {
        let style_fit = matches!(
            (learning_style, resource.learning_style),
            (Some(want), Some(have)) if want == have
        );
        let difficulty_fit = resource.difficulty == want_difficulty;
        std::cmp::Reverse((style_fit as u8, difficulty_fit as u8))
    });
    resources
}

// ===== Entrepreneurship =====

/// Connection for a topic at a grade band; unmapped topics fall back to the
/// profile default instead of failing.
pub(crate) fn connection_for(
    profile: &AgentProfile,
    topic: &str,
    grade_level: GradeLevel,
) -> EntrepreneurshipConnection {
    let lowered = topic.trim().to_lowercase();
    let spec = profile
        .connections
        .iter()
        .find(|entry| {
            !lowered.is_empty()
                && entry.topics.iter().any(|fragment| {
                    lowered.contains(fragment) || fragment.contains(lowered.as_str())
                })
        })
        .map(|entry| &entry.spec)
        .unwrap_or(&profile.default_connection);

    let band = band_index(grade_level.band());
    EntrepreneurshipConnection {
        subject: Subject::new(profile.subject),
        topic: topic.to_string(),
        grade_level,
        narrative: spec.narratives[band].to_string(),
        example_business_applications: spec.applications[band]
            .iter()
            .map(|application| (*application).to_string())
            .collect(),
    }
}

fn band_index(band: GradeBand) -> usize {
    match band {
        GradeBand::Lower => 0,
        GradeBand::Middle => 1,
        GradeBand::Upper => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuestionOutcome;
    use strum::IntoEnumIterator;

    const EMPTY: &[&str] = &[];
    const LADDER_TOPIC: &[&str] = &["Knots", "Advanced Knots"];

    static TEST_PROFILE: AgentProfile = AgentProfile {
        subject: "ropecraft",
        name: "Test Agent",
        description: "test profile",
        topics_by_grade: [
            LADDER_TOPIC,
            EMPTY,
            EMPTY,
            EMPTY,
            EMPTY,
            EMPTY,
            EMPTY,
            EMPTY,
            EMPTY,
            EMPTY,
            EMPTY,
            EMPTY,
        ],
        categories: &[("knot", "knots"), ("splice", "splicing")],
        qa_rules: &[QaRule {
            keywords: &["knot"],
            answer: "A knot fastens rope.",
            confidence: 0.9,
        }],
        generic_answer: "I am not sure; try rephrasing with ropecraft terms.",
        practice_note: "Practice with real rope.",
        project_scenario: "Use {topic} to rig a small stall canopy.",
        rubric_focus: "Rigging accuracy",
        segment_minutes: 30,
        catalog: &[
            CatalogEntry {
                title: "General Guide",
                description: "Guide covering {topic}",
                url: "#",
                kind: ResourceKind::Course,
                difficulty: Difficulty::Beginner,
                learning_style: None,
                categories: EMPTY,
                tags: EMPTY,
            },
            CatalogEntry {
                title: "Knot Videos",
                description: "Video walkthroughs of {topic}",
                url: "#",
                kind: ResourceKind::Video,
                difficulty: Difficulty::Intermediate,
                learning_style: Some(LearningStyle::Visual),
                categories: &["knots"],
                tags: EMPTY,
            },
            CatalogEntry {
                title: "Splice Workbook",
                description: "Workbook on {topic}",
                url: "#",
                kind: ResourceKind::Activity,
                difficulty: Difficulty::Intermediate,
                learning_style: Some(LearningStyle::Kinesthetic),
                categories: &["splicing"],
                tags: EMPTY,
            },
        ],
        connections: &[ConnectionEntry {
            topics: &["knot"],
            spec: ConnectionSpec {
                narratives: ["Tie bundles for a bake sale.", "Rig a market stall.", "Run a rigging service."],
                applications: [&["Bundle firewood"], &["Set up stalls"], &["Contract rigging work"]],
            },
        }],
        default_connection: ConnectionSpec {
            narratives: ["Rope skills help at home.", "Rope skills help your school.", "Rope skills support trade work."],
            applications: [&["Help at home"], &["Help at school"], &["Sell rope goods"]],
        },
    };

    #[test]
    fn test_difficulty_thresholds() {
        assert_eq!(difficulty_for_proficiency(0.0), Difficulty::Beginner);
        assert_eq!(difficulty_for_proficiency(0.29), Difficulty::Beginner);
        assert_eq!(difficulty_for_proficiency(0.3), Difficulty::Intermediate);
        assert_eq!(difficulty_for_proficiency(0.69), Difficulty::Intermediate);
        assert_eq!(difficulty_for_proficiency(0.7), Difficulty::Advanced);
    }

    #[test]
    fn test_resolve_topic_containment_both_directions() {
        assert_eq!(resolve_topic(&TEST_PROFILE, "knots"), Some("Knots"));
        assert_eq!(resolve_topic(&TEST_PROFILE, "advanced knots for sailing"), Some("Knots"));
        assert_eq!(resolve_topic(&TEST_PROFILE, "KNOTS"), Some("Knots"));
        assert_eq!(resolve_topic(&TEST_PROFILE, "weaving"), None);
        assert_eq!(resolve_topic(&TEST_PROFILE, "   "), None);
    }

    #[test]
    fn test_categorize_first_match_and_general_fallback() {
        assert_eq!(categorize(&TEST_PROFILE, "Advanced Knots"), "knots");
        assert_eq!(categorize(&TEST_PROFILE, "Eye Splice"), "splicing");
        assert_eq!(categorize(&TEST_PROFILE, "Weaving"), "general");
    }

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let tokens = tokenize("How do I tie a Bowline knot?");
        assert!(tokens.contains(&"bowline".to_string()));
        assert!(tokens.contains(&"knot".to_string()));
        assert!(!tokens.contains(&"Bowline".to_string()));
    }

    #[test]
    fn test_vocabulary_skips_stopwords_and_short_words() {
        let vocabulary = build_vocabulary(&TEST_PROFILE);
        assert!(vocabulary.contains("knots"));
        assert!(vocabulary.contains("ropecraft"));
        // "Advanced Knots": the difficulty word is filtered out.
        assert!(!vocabulary.contains("advanced"));
    }

    #[test]
    fn test_mastered_topics_become_review_segments() {
        let mut prior = HashMap::new();
        prior.insert("knots".to_string(), 0.8);
        let segments = path_segments(&TEST_PROFILE, GradeLevel::Grade(1), &prior);

        assert_eq!(segments.len(), 2);
        let knots = segments.iter().find(|s| s.topic == "Knots").unwrap();
        assert_eq!(knots.kind, SegmentKind::Review);
        assert_eq!(knots.estimated_minutes, REVIEW_MINUTES);
        let advanced = segments.iter().find(|s| s.topic == "Advanced Knots").unwrap();
        assert_eq!(advanced.kind, SegmentKind::Study);
        assert_eq!(advanced.recommended_difficulty, Difficulty::Beginner);
    }

    #[test]
    fn test_segments_sorted_by_difficulty() {
        let mut prior = HashMap::new();
        prior.insert("Advanced Knots".to_string(), 0.5);
        let segments = path_segments(&TEST_PROFILE, GradeLevel::Grade(1), &prior);

        let difficulties: Vec<Difficulty> =
            segments.iter().map(|s| s.recommended_difficulty).collect();
        let mut sorted = difficulties.clone();
        sorted.sort();
        assert_eq!(difficulties, sorted);
        // Intermediate prior knowledge moved Advanced Knots up the ladder.
        assert_eq!(segments[0].topic, "Knots");
        assert_eq!(segments[1].recommended_difficulty, Difficulty::Intermediate);
    }

    #[test]
    fn test_generate_content_rejects_unknown_topic() {
        let err = generate_content(
            &TEST_PROFILE,
            "Weaving",
            ContentType::Lesson,
            Difficulty::Beginner,
            GradeLevel::Grade(4),
        )
        .unwrap_err();
        assert_eq!(
            err,
            AgentError::UnsupportedTopic {
                subject: "ropecraft".to_string(),
                topic: "Weaving".to_string(),
            }
        );
    }

    #[test]
    fn test_exercise_problem_counts_scale_with_difficulty() {
        let counts: Vec<usize> = Difficulty::iter().map(problem_count).collect();
        assert_eq!(counts, vec![5, 8, 10]);

        for difficulty in Difficulty::iter() {
            let content = generate_content(
                &TEST_PROFILE,
                "Knots",
                ContentType::Exercise,
                difficulty,
                GradeLevel::Grade(2),
            )
            .unwrap();
            let numbered = content
                .body
                .lines()
                .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
                .count();
            assert_eq!(numbered, problem_count(difficulty));
        }
    }

    #[test]
    fn test_quiz_body_carries_pass_mark_and_time_limit() {
        let content = generate_content(
            &TEST_PROFILE,
            "Knots",
            ContentType::Quiz,
            Difficulty::Intermediate,
            GradeLevel::Grade(5),
        )
        .unwrap();
        assert!(content.body.contains("pass mark 7 of 10"));
        assert!(content.body.contains("15 minutes"));
    }

    #[test]
    fn test_project_body_substitutes_topic_and_rubric() {
        let content = generate_content(
            &TEST_PROFILE,
            "Knots",
            ContentType::Project,
            Difficulty::Advanced,
            GradeLevel::Grade(9),
        )
        .unwrap();
        assert!(content.body.contains("Use Knots to rig a small stall canopy."));
        assert!(content.body.contains("Rigging accuracy: 30%"));
        assert!(content.body.contains("Presentation quality: 20%"));
    }

    #[test]
    fn test_analysis_classifies_strengths_and_weaknesses() {
        let record = PerformanceRecord {
            student_id: 7,
            subject: Subject::new("ropecraft"),
            activity_type: "quiz".to_string(),
            topic: "Knots".to_string(),
            score: 8.0,
            max_score: 10.0,
            answers: vec![
                QuestionOutcome { correct: true, category: "hitches".to_string() },
                QuestionOutcome { correct: true, category: "hitches".to_string() },
                QuestionOutcome { correct: false, category: "bends".to_string() },
            ],
        };
        let analysis = analyze_performance(&record).unwrap();

        assert_eq!(analysis.normalized_score, 0.8);
        assert_eq!(analysis.performance_level, PerformanceLevel::Good);
        assert!(analysis.strengths.contains("hitches"));
        assert!(analysis.weaknesses.contains("bends"));
        assert!(analysis.feedback.contains("80.0%"));
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("bends")));
    }

    #[test]
    fn test_analysis_rejects_invalid_records() {
        let mut record = PerformanceRecord {
            student_id: 7,
            subject: Subject::new("ropecraft"),
            activity_type: "quiz".to_string(),
            topic: "Knots".to_string(),
            score: 12.0,
            max_score: 10.0,
            answers: vec![],
        };
        assert!(analyze_performance(&record).is_err());

        record.score = -1.0;
        assert!(analyze_performance(&record).is_err());

        record.score = 5.0;
        record.max_score = 0.0;
        assert!(analyze_performance(&record).is_err());

        record.max_score = f64::NAN;
        assert!(analyze_performance(&record).is_err());
    }

    #[test]
    fn test_rule_answer_beats_generic() {
        let vocabulary = build_vocabulary(&TEST_PROFILE);
        let hit = answer_question(
            &TEST_PROFILE,
            &vocabulary,
            "How do I tie a knot?",
            &QuestionContext::default(),
        );
        assert_eq!(hit.text, "A knot fastens rope.");
        assert!(hit.confidence > 0.85);
        assert!(hit.confidence <= MAX_CONFIDENCE);

        let miss = answer_question(
            &TEST_PROFILE,
            &vocabulary,
            "What is the capital of France?",
            &QuestionContext::default(),
        );
        assert_eq!(miss.text, TEST_PROFILE.generic_answer);
        assert!(miss.confidence <= 0.25);
    }

    #[test]
    fn test_business_question_uses_connection_narrative() {
        let vocabulary = build_vocabulary(&TEST_PROFILE);
        let response = answer_question(
            &TEST_PROFILE,
            &vocabulary,
            "Could this become a business?",
            &QuestionContext {
                topic: Some("Knots".to_string()),
                grade_level: Some(GradeLevel::Grade(4)),
            },
        );
        assert_eq!(response.text, "Tie bundles for a bake sale.");
        assert!(response.confidence >= BUSINESS_CONFIDENCE);
    }

    #[test]
    fn test_resource_ranking_prefers_style_then_difficulty() {
        let ranked = suggest_resources(
            &TEST_PROFILE,
            "Knots",
            Some(LearningStyle::Visual),
            Some(Difficulty::Beginner),
        );
        // Splice Workbook is filtered out by category.
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].title, "Knot Videos");
        assert_eq!(ranked[1].title, "General Guide");
        assert!(ranked[1].description.contains("Knots"));
    }

    #[test]
    fn test_connection_band_gating_and_fallback() {
        let lower = connection_for(&TEST_PROFILE, "Knots", GradeLevel::Grade(3));
        let upper = connection_for(&TEST_PROFILE, "Knots", GradeLevel::Grade(11));
        assert_ne!(lower.narrative, upper.narrative);
        assert_eq!(lower.example_business_applications, vec!["Bundle firewood"]);

        let fallback = connection_for(&TEST_PROFILE, "Weaving", GradeLevel::Tertiary);
        assert_eq!(fallback.narrative, "Rope skills support trade work.");
        assert_eq!(fallback.topic, "Weaving");
    }
}
