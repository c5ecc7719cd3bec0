//! Mathematics Navigator, the builtin mathematics agent.

use super::common::{self, AgentProfile, CatalogEntry, ConnectionEntry, ConnectionSpec, QaRule};
use crate::error::AgentError;
use crate::registry::SubjectAgent;
use crate::types::{
    ContentType, Difficulty, EntrepreneurshipConnection, GeneratedContent, GradeLevel,
    LearningStyle, PathSegment, PerformanceAnalysis, PerformanceRecord, QuestionContext,
    QuestionResponse, Resource, ResourceKind, Subject,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Registry constructor.
pub fn construct() -> Arc<dyn SubjectAgent> {
    Arc::new(MathematicsAgent::new())
}

#[derive(Debug)]
pub struct MathematicsAgent {
    vocabulary: HashSet<String>,
}

impl MathematicsAgent {
    pub fn new() -> Self {
        MathematicsAgent {
            vocabulary: common::build_vocabulary(&PROFILE),
        }
    }
}

impl Default for MathematicsAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl SubjectAgent for MathematicsAgent {
    fn subject(&self) -> Subject {
        Subject::new(PROFILE.subject)
    }

    fn name(&self) -> &str {
        PROFILE.name
    }

    fn description(&self) -> &str {
        PROFILE.description
    }

    fn path_segments(
        &self,
        grade_level: GradeLevel,
        prior_knowledge: &HashMap<String, f64>,
    ) -> Result<Vec<PathSegment>, AgentError> {
        Ok(common::path_segments(&PROFILE, grade_level, prior_knowledge))
    }

    fn generate_content(
        &self,
        topic: &str,
        content_type: ContentType,
        difficulty: Difficulty,
        grade_level: GradeLevel,
    ) -> Result<GeneratedContent, AgentError> {
        common::generate_content(&PROFILE, topic, content_type, difficulty, grade_level)
    }

    fn analyze_performance(
        &self,
        record: &PerformanceRecord,
    ) -> Result<PerformanceAnalysis, AgentError> {
        common::analyze_performance(record)
    }

    fn answer_question(
        &self,
        question: &str,
        context: &QuestionContext,
    ) -> Result<QuestionResponse, AgentError> {
        Ok(common::answer_question(&PROFILE, &self.vocabulary, question, context))
    }

    fn suggest_resources(
        &self,
        topic: &str,
        learning_style: Option<LearningStyle>,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Resource>, AgentError> {
        Ok(common::suggest_resources(&PROFILE, topic, learning_style, difficulty))
    }

    fn entrepreneurship_connection(
        &self,
        topic: &str,
        grade_level: GradeLevel,
    ) -> Result<EntrepreneurshipConnection, AgentError> {
        Ok(common::connection_for(&PROFILE, topic, grade_level))
    }
}

static PROFILE: AgentProfile = AgentProfile {
    subject: "mathematics",
    name: "Mathematics Navigator",
    description: "Specialized agent for mathematics education",
    topics_by_grade: [
        &["Counting", "Basic Addition", "Basic Subtraction", "Shapes"],
        &["Addition", "Subtraction", "Simple Fractions", "Time"],
        &["Multiplication", "Division", "Fractions", "Measurement"],
        &["Multi-digit Operations", "Decimals", "Geometry", "Data Analysis"],
        &["Fractions Operations", "Decimals Operations", "Geometry", "Measurement"],
        &["Ratios", "Percentages", "Intro to Algebra", "Statistics"],
        &["Pre-Algebra", "Geometry", "Statistics", "Probability"],
        &["Algebra I", "Geometry", "Data Analysis", "Mathematical Modeling"],
        &["Algebra II", "Geometry", "Trigonometry", "Statistics"],
        &["Advanced Algebra", "Trigonometry", "Probability", "Financial Mathematics"],
        &["Pre-Calculus", "Statistics", "Mathematical Modeling", "Business Mathematics"],
        &["Calculus", "Advanced Statistics", "Discrete Mathematics", "Financial Planning"],
    ],
    categories: &[
        ("algebra", "algebra"),
        ("equation", "equations"),
        ("trigonometr", "geometry"),
        ("geometr", "geometry"),
        ("shape", "geometry"),
        ("statistic", "statistics"),
        ("data", "statistics"),
        ("probability", "probability"),
        ("calculus", "calculus"),
        ("financial", "financial mathematics"),
        ("business", "financial mathematics"),
        ("money", "financial mathematics"),
        ("counting", "arithmetic"),
        ("addition", "arithmetic"),
        ("subtraction", "arithmetic"),
        ("multiplication", "arithmetic"),
        ("division", "arithmetic"),
        ("operation", "arithmetic"),
        ("fraction", "arithmetic"),
        ("decimal", "arithmetic"),
        ("ratio", "arithmetic"),
        ("percentage", "arithmetic"),
        ("measurement", "measurement"),
        ("time", "measurement"),
        ("modeling", "algebra"),
        ("discrete", "algebra"),
    ],
    qa_rules: &[
        QaRule {
            keywords: &["add", "sum", "plus", "addition"],
            answer: "To add numbers, you combine their values. For example, 5 + 3 = 8.",
            confidence: 0.9,
        },
        QaRule {
            keywords: &["subtract", "minus", "difference", "subtraction"],
            answer: "To subtract, you find the difference between two numbers. For example, 8 - 3 = 5.",
            confidence: 0.9,
        },
        QaRule {
            keywords: &["multiply", "product", "times", "multiplication"],
            answer: "Multiplication is repeated addition. For example, 4 x 3 means 4 + 4 + 4 = 12.",
            confidence: 0.9,
        },
        QaRule {
            keywords: &["divide", "quotient", "division"],
            answer: "Division is sharing a number into equal parts. For example, 12 / 3 = 4.",
            confidence: 0.9,
        },
        QaRule {
            keywords: &["formula", "equation"],
            answer: "Mathematical formulas express relationships between variables. For example, the area of a rectangle is A = length x width.",
            confidence: 0.8,
        },
    ],
    generic_answer: "I'm not sure about the answer to this specific mathematics question. Could you provide more details or rephrase it?",
    practice_note: "Work the practice problems until the steps feel routine.",
    project_scenario: "You are starting a small business and need to use {topic} to optimize your operations. Choose a product or service, then work through the numbers behind it.",
    rubric_focus: "Mathematical accuracy",
    segment_minutes: 65,
    catalog: &[
        CatalogEntry {
            title: "Khan Academy",
            description: "Free online lessons and exercises on {topic}",
            url: "https://www.khanacademy.org/math",
            kind: ResourceKind::Interactive,
            difficulty: Difficulty::Beginner,
            learning_style: None,
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "Desmos",
            description: "Interactive graphing calculator and activities",
            url: "https://www.desmos.com/",
            kind: ResourceKind::Tool,
            difficulty: Difficulty::Intermediate,
            learning_style: None,
            categories: &["algebra", "geometry", "statistics", "calculus", "probability", "equations"],
            tags: &[],
        },
        CatalogEntry {
            title: "Mathematics for Business and Economics",
            description: "Learn how mathematics applies to business scenarios",
            url: "#",
            kind: ResourceKind::Course,
            difficulty: Difficulty::Intermediate,
            learning_style: None,
            categories: &[],
            tags: &["business"],
        },
        CatalogEntry {
            title: "Visual Mathematics",
            description: "Visual explanations of {topic} with interactive diagrams",
            url: "#",
            kind: ResourceKind::Interactive,
            difficulty: Difficulty::Intermediate,
            learning_style: Some(LearningStyle::Visual),
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "{topic} Explained - Audio Course",
            description: "Audio lectures explaining {topic} concepts",
            url: "#",
            kind: ResourceKind::Audio,
            difficulty: Difficulty::Intermediate,
            learning_style: Some(LearningStyle::Auditory),
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "Hands-on {topic} Activities",
            description: "Physical and interactive activities to learn {topic}",
            url: "#",
            kind: ResourceKind::Activity,
            difficulty: Difficulty::Intermediate,
            learning_style: Some(LearningStyle::Kinesthetic),
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "{topic} Fundamentals",
            description: "Introduction to basic concepts in {topic}",
            url: "#",
            kind: ResourceKind::Course,
            difficulty: Difficulty::Beginner,
            learning_style: None,
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "Advanced {topic}",
            description: "In-depth exploration of advanced concepts in {topic}",
            url: "#",
            kind: ResourceKind::Course,
            difficulty: Difficulty::Advanced,
            learning_style: None,
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "Mathematics in Entrepreneurship: {topic} Applications",
            description: "Learn how {topic} is applied in business and entrepreneurship",
            url: "#",
            kind: ResourceKind::Course,
            difficulty: Difficulty::Intermediate,
            learning_style: None,
            categories: &[],
            tags: &["entrepreneurship", "business", "application"],
        },
    ],
    connections: &[
        ConnectionEntry {
            topics: &["algebra"],
            spec: ConnectionSpec {
                narratives: [
                    "Algebra is like a recipe for numbers. Knowing how amounts change helps you price snacks for a school sale and check you make a little money on each one.",
                    "Algebra lets you plan a small business project: set a price, estimate costs, and work out how many sales your school enterprise needs to break even.",
                    "Algebra is essential for financial modeling, pricing strategies, and growth projections in startups. With it you can build the models a real venture runs on.",
                ],
                applications: [
                    &["Price snacks for a classroom stall", "Check pocket-money savings each week"],
                    &["Set prices for a school fundraiser", "Estimate how many sales cover your costs"],
                    &["Creating pricing models", "Forecasting revenue growth", "Calculating break-even points"],
                ],
            },
        },
        ConnectionEntry {
            topics: &["statistic", "data"],
            spec: ConnectionSpec {
                narratives: [
                    "Keeping simple tallies shows you what sells best. Counting which treats classmates buy most tells you what to make more of.",
                    "Collecting and charting numbers from a school market day shows which products work, so your next stall can stock what people actually want.",
                    "Statistics enables data-driven decision making, market research analysis, and performance tracking, the daily toolkit of a venture finding its market.",
                ],
                applications: [
                    &["Tally what sells at a bake sale", "Chart which games friends like most"],
                    &["Survey classmates before a fundraiser", "Track weekly sales of a school stall"],
                    &["Analyzing market trends", "A/B testing for product features", "Customer segmentation"],
                ],
            },
        },
        ConnectionEntry {
            topics: &["calculus"],
            spec: ConnectionSpec {
                narratives: [
                    "Watching how fast things change, like how quickly a jar of sweets empties, is the first step toward the mathematics of change.",
                    "The mathematics of change helps you spot trends, like whether sales at a school tuck shop are speeding up or slowing down.",
                    "Calculus helps optimize business processes, maximize profits, and model complex systems, from production lines to delivery schedules.",
                ],
                applications: [
                    &["Notice how fast stock runs out", "Spot which jar empties quickest"],
                    &["Track whether tuck shop sales are rising", "Plan restocking before items run out"],
                    &["Optimizing production processes", "Maximizing profit functions", "Resource allocation"],
                ],
            },
        },
        ConnectionEntry {
            topics: &["geometr", "trigonometr", "shape"],
            spec: ConnectionSpec {
                narratives: [
                    "Shapes and space help you arrange a classroom stall so everything fits and looks inviting.",
                    "Space and measurement let you lay out a market table, design packaging, and plan the shortest route to deliver orders around school.",
                    "Geometry is valuable in design, spatial planning, and logistics optimization, from store layouts to delivery routes.",
                ],
                applications: [
                    &["Arrange a stall so goods fit neatly", "Cut wrapping paper without waste"],
                    &["Design packaging for a school product", "Plan a delivery route around your neighbourhood"],
                    &["Store layout optimization", "Efficient packaging design", "Delivery route planning"],
                ],
            },
        },
        ConnectionEntry {
            topics: &["probability"],
            spec: ConnectionSpec {
                narratives: [
                    "Thinking about what is likely, like whether it may rain on market day, helps you plan ahead.",
                    "Weighing chances helps you decide how much stock to make for a school event when you cannot be sure how many people will come.",
                    "Probability supports risk assessment, decision making under uncertainty, and forecasting, the judgment calls every founder faces.",
                ],
                applications: [
                    &["Guess how many cupcakes a stall might sell", "Plan for a rainy market day"],
                    &["Decide stock levels for a school event", "Weigh the risk of a new product idea"],
                    &["Risk analysis for business decisions", "Insurance pricing models", "Inventory management"],
                ],
            },
        },
    ],
    default_connection: ConnectionSpec {
        narratives: [
            "Even simple math helps you run a small stand: count money, give change, and know whether you made a profit.",
            "Mathematics lets you plan and run small business projects in your community, from budgeting to tracking what you earn.",
            "Mathematics is fundamental to business planning, financial management, and data-driven decision making in any venture.",
        ],
        applications: [
            &["Count takings from a lemonade stand", "Work out if a craft sale made money"],
            &["Budget a community project", "Track earnings from weekend work"],
            &["Financial planning and analysis", "Operational optimization", "Data-driven decision making"],
        ],
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_grade_has_a_ladder() {
        for (index, topics) in PROFILE.topics_by_grade.iter().enumerate() {
            assert_eq!(topics.len(), 4, "grade {} ladder is incomplete", index + 1);
        }
    }

    #[test]
    fn test_addition_question_hits_rule() {
        let agent = MathematicsAgent::new();
        let response = agent
            .answer_question("How do I add fractions?", &QuestionContext::default())
            .unwrap();
        assert!(response.text.starts_with("To add numbers"));
        assert!(response.confidence >= 0.85);
        assert!(response.confidence <= common::MAX_CONFIDENCE);
    }

    #[test]
    fn test_algebra_lesson_carries_business_angle() {
        let agent = MathematicsAgent::new();
        let content = agent
            .generate_content("Algebra", ContentType::Lesson, Difficulty::Intermediate, GradeLevel::Grade(10))
            .unwrap();
        assert_eq!(content.title, "Algebra - Lesson");
        assert!(content.body.contains("## Entrepreneurship Angle"));
        assert!(content.body.contains("financial modeling"));
    }

    #[test]
    fn test_off_taxonomy_topic_rejected() {
        let agent = MathematicsAgent::new();
        let err = agent
            .generate_content("Photosynthesis", ContentType::Quiz, Difficulty::Beginner, GradeLevel::Grade(8))
            .unwrap_err();
        assert_eq!(err.kind(), "unsupported_topic");
    }

    #[test]
    fn test_desmos_only_suggested_for_matching_topics() {
        let agent = MathematicsAgent::new();

        let algebra = agent.suggest_resources("Algebra I", None, None).unwrap();
        assert!(algebra.iter().any(|r| r.title == "Desmos"));

        let counting = agent.suggest_resources("Counting", None, None).unwrap();
        assert!(!counting.iter().any(|r| r.title == "Desmos"));
        assert!(counting.iter().any(|r| r.title == "Khan Academy"));
    }

    #[test]
    fn test_connection_scales_with_grade_band() {
        let agent = MathematicsAgent::new();
        let lower = agent
            .entrepreneurship_connection("Algebra", GradeLevel::Grade(3))
            .unwrap();
        let upper = agent
            .entrepreneurship_connection("Algebra", GradeLevel::Grade(11))
            .unwrap();

        assert_ne!(lower.narrative, upper.narrative);
        assert!(upper.narrative.contains("financial modeling"));
        assert!(!lower.example_business_applications.is_empty());
    }
}
