//! Science Illuminator, the builtin science agent.
//!
//! Covers the natural sciences as one ladder per grade, with
//! biology, chemistry, physics and earth science strands.

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
    Arc::new(ScienceAgent::new())
}

#[derive(Debug)]
pub struct ScienceAgent {
    vocabulary: HashSet<String>,
}

impl ScienceAgent {
    pub fn new() -> Self {
        ScienceAgent {
            vocabulary: common::build_vocabulary(&PROFILE),
        }
    }
}

impl Default for ScienceAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl SubjectAgent for ScienceAgent {
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
    subject: "science",
    name: "Science Illuminator",
    description: "Specialized agent for science education",
    topics_by_grade: [
        &["Plants and Animals", "Weather", "The Five Senses", "Earth and Space"],
        &["Life Cycles", "States of Matter", "Habitats", "Simple Machines"],
        &["Animal Adaptations", "Forces and Motion", "Solar System", "Ecosystems"],
        &["Energy", "Human Body Systems", "Earth's Processes", "Classification"],
        &["Matter and Mixtures", "Ecosystems", "Weather and Climate", "Space Exploration"],
        &["Cells", "Forces and Motion", "Earth's Structure", "Energy Transformations"],
        &["Human Body Systems", "Chemical Reactions", "Weather and Climate", "Ecology"],
        &["Genetics", "Chemistry Fundamentals", "Earth's History", "Waves and Energy"],
        &[
            "Biology: Cells and Systems",
            "Chemistry: Atomic Structure",
            "Physics: Motion and Forces",
            "Earth Science: Geology",
        ],
        &[
            "Biology: Genetics and Evolution",
            "Chemistry: Chemical Reactions",
            "Physics: Energy",
            "Environmental Science",
        ],
        &[
            "Biology: Physiology",
            "Chemistry: Organic Chemistry",
            "Physics: Electricity and Magnetism",
            "Earth Science: Climate",
        ],
        &["Advanced Biology", "Advanced Chemistry", "Advanced Physics", "Scientific Research Methods"],
    ],
    categories: &[
        ("biolog", "biology"),
        ("cell", "biology"),
        ("genetic", "biology"),
        ("organism", "biology"),
        ("plant", "biology"),
        ("animal", "biology"),
        ("body", "biology"),
        ("life", "biology"),
        ("habitat", "biology"),
        ("adaptation", "biology"),
        ("physiol", "biology"),
        ("classification", "biology"),
        ("senses", "biology"),
        ("ecosystem", "environmental science"),
        ("ecolog", "environmental science"),
        ("environment", "environmental science"),
        ("chemi", "chemistry"),
        ("matter", "chemistry"),
        ("mixture", "chemistry"),
        ("organic", "chemistry"),
        ("atomic", "chemistry"),
        ("physic", "physics"),
        ("force", "physics"),
        ("motion", "physics"),
        ("energy", "physics"),
        ("wave", "physics"),
        ("machine", "physics"),
        ("electricity", "physics"),
        ("magneti", "physics"),
        ("earth", "earth science"),
        ("weather", "earth science"),
        ("climate", "earth science"),
        ("space", "earth science"),
        ("solar", "earth science"),
        ("geology", "earth science"),
        ("research", "scientific method"),
        ("method", "scientific method"),
    ],
    qa_rules: &[
        QaRule {
            keywords: &["scientific", "method", "experiment"],
            answer: "The scientific method is a process for experimentation used to explore observations and answer questions. It involves making observations, forming a hypothesis, conducting experiments, analyzing data, and drawing conclusions.",
            confidence: 0.9,
        },
        QaRule {
            keywords: &["biology", "cell", "organism"],
            answer: "Biology is the study of living organisms. Cells are the basic structural and functional units of all living organisms. They contain organelles that perform specific functions to keep the cell alive.",
            confidence: 0.85,
        },
        QaRule {
            keywords: &["chemistry", "element", "compound", "reaction"],
            answer: "Chemistry is the study of matter, its properties, and the changes it undergoes. Elements are pure substances that cannot be broken down further by chemical means. Compounds are substances made up of two or more elements chemically combined.",
            confidence: 0.85,
        },
        QaRule {
            keywords: &["physics", "force", "motion", "energy"],
            answer: "Physics is the study of matter, energy, and the interactions between them. Forces cause objects to accelerate, and energy is the capacity to do work or cause change.",
            confidence: 0.85,
        },
        QaRule {
            keywords: &["earth", "geology", "climate"],
            answer: "Earth science studies the planet's physical characteristics, atmosphere, and surrounding space. It includes geology (study of Earth's structure), meteorology (study of weather), and oceanography (study of oceans).",
            confidence: 0.8,
        },
    ],
    generic_answer: "I'm not sure about the answer to this specific science question. Could you provide more details or rephrase it?",
    practice_note: "Ground each concept with laboratory work and hands-on experiments.",
    project_scenario: "Apply your knowledge of {topic} to develop an innovative solution to a real-world problem. Identify a challenge in your community that science can address, then design and test your answer.",
    rubric_focus: "Scientific accuracy",
    segment_minutes: 110,
    catalog: &[
        CatalogEntry {
            title: "Khan Academy Science",
            description: "Free online lessons and exercises on {topic}",
            url: "https://www.khanacademy.org/science",
            kind: ResourceKind::Interactive,
            difficulty: Difficulty::Beginner,
            learning_style: None,
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "PhET Interactive Simulations",
            description: "Interactive science simulations that make learning fun",
            url: "https://phet.colorado.edu/",
            kind: ResourceKind::Simulation,
            difficulty: Difficulty::Intermediate,
            learning_style: None,
            categories: &["physics", "chemistry", "earth science"],
            tags: &[],
        },
        CatalogEntry {
            title: "Science and Entrepreneurship",
            description: "Learn how scientific discoveries lead to business innovations",
            url: "#",
            kind: ResourceKind::Course,
            difficulty: Difficulty::Intermediate,
            learning_style: None,
            categories: &[],
            tags: &["entrepreneurship"],
        },
        CatalogEntry {
            title: "Visual Science",
            description: "Visual explanations of {topic} with interactive diagrams",
            url: "#",
            kind: ResourceKind::Interactive,
            difficulty: Difficulty::Intermediate,
            learning_style: Some(LearningStyle::Visual),
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "{topic} Explained - Science Podcast",
            description: "Audio explanations of {topic} concepts",
            url: "#",
            kind: ResourceKind::Audio,
            difficulty: Difficulty::Intermediate,
            learning_style: Some(LearningStyle::Auditory),
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "Hands-on {topic} Experiments",
            description: "Physical experiments and activities to learn {topic}",
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
            title: "{topic} in South African Context",
            description: "Learn how {topic} is applied in South African research and industry",
            url: "#",
            kind: ResourceKind::Article,
            difficulty: Difficulty::Intermediate,
            learning_style: None,
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "From Science to Startup: {topic} Applications",
            description: "Learn how {topic} can be applied to create innovative business solutions",
            url: "#",
            kind: ResourceKind::Course,
            difficulty: Difficulty::Intermediate,
            learning_style: None,
            categories: &[],
            tags: &["entrepreneurship", "innovation", "application"],
        },
    ],
    connections: &[
        ConnectionEntry {
            topics: &["biolog", "cell", "genetic", "plant", "animal", "body", "life"],
            spec: ConnectionSpec {
                narratives: [
                    "Knowing how plants and animals live helps you grow a small vegetable patch and notice simple problems you could fix.",
                    "Understanding living things lets you run projects like a school vegetable garden or seedling nursery that people will pay for.",
                    "Biology knowledge can lead to innovations in healthcare, agriculture, and biotechnology. These skills equip you to build solutions that could anchor a startup.",
                ],
                applications: [
                    &["Grow herbs to sell at a school market", "Care for seedlings for neighbours"],
                    &["Run a school vegetable garden stall", "Raise seedlings for community gardens"],
                    &["Developing healthcare solutions", "Creating sustainable agricultural practices", "Biotechnology innovations"],
                ],
            },
        },
        ConnectionEntry {
            topics: &["chemi", "matter", "mixture"],
            spec: ConnectionSpec {
                narratives: [
                    "Mixing safe kitchen ingredients shows how materials change, the same idea behind making soaps and treats people buy.",
                    "Knowing how substances combine lets you make simple products like natural soaps or candles for a market day.",
                    "Chemistry enables the development of new materials, pharmaceuticals, and sustainable products. That knowledge underpins ventures from cosmetics to water treatment.",
                ],
                applications: [
                    &["Make bath salts to sell at a fair", "Test which homemade glue holds best"],
                    &["Produce natural soap for a market day", "Compare recipes to cut ingredient costs"],
                    &["Creating eco-friendly products", "Developing new materials", "Improving manufacturing processes"],
                ],
            },
        },
        ConnectionEntry {
            topics: &["physic", "force", "motion", "energy", "wave", "electricity", "machine"],
            spec: ConnectionSpec {
                narratives: [
                    "Learning how things move and use energy helps you build toys and gadgets that really work.",
                    "Forces and energy explain how machines work, so you can build and repair simple devices people need.",
                    "Physics knowledge can lead to innovations in energy, transportation, and technology. Founders use it to build everything from solar heaters to sensors.",
                ],
                applications: [
                    &["Build a toy car that rolls far", "Rig a pulley to lift a heavy bag"],
                    &["Build a solar oven for a science fair", "Fix bicycles for classmates"],
                    &["Renewable energy solutions", "Efficient transportation systems", "Sensor and measurement technologies"],
                ],
            },
        },
        ConnectionEntry {
            topics: &["environment", "ecolog", "ecosystem", "climate"],
            spec: ConnectionSpec {
                narratives: [
                    "Caring for nature teaches you to reuse and recycle, and people value things made from waste.",
                    "Understanding ecosystems helps you run recycling drives and water-saving projects your community will support.",
                    "Environmental science knowledge can lead to solutions for sustainability, conservation, and resource management. Green ventures grow straight out of it.",
                ],
                applications: [
                    &["Collect cans for recycling money", "Make planters from old bottles"],
                    &["Organize a paid recycling collection", "Sell compost made from food scraps"],
                    &["Waste management solutions", "Conservation technologies", "Sustainable resource management"],
                ],
            },
        },
    ],
    default_connection: ConnectionSpec {
        narratives: [
            "Even simple science helps you spot problems around you and invent little fixes people appreciate.",
            "Scientific thinking helps you design solutions for school and community challenges that people would pay for.",
            "Scientific knowledge is the foundation for innovation and solving real-world problems, which can lead to business opportunities.",
        ],
        applications: [
            &["Invent a fix for a classroom problem", "Show friends a useful experiment"],
            &["Prototype a solution for a community need", "Demonstrate a product idea at a science expo"],
            &["Developing innovative products", "Creating efficient processes", "Solving community challenges"],
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
    fn test_scientific_method_question() {
        let agent = ScienceAgent::new();
        let response = agent
            .answer_question("What is the scientific method?", &QuestionContext::default())
            .unwrap();
        assert!(response.text.contains("hypothesis"));
        assert!(response.confidence >= 0.85);
    }

    #[test]
    fn test_phet_matches_physics_but_not_genetics() {
        let agent = ScienceAgent::new();

        let physics = agent.suggest_resources("Physics: Energy", None, None).unwrap();
        assert!(physics.iter().any(|r| r.title == "PhET Interactive Simulations"));

        let genetics = agent.suggest_resources("Genetics", None, None).unwrap();
        assert!(!genetics.iter().any(|r| r.title == "PhET Interactive Simulations"));
    }

    #[test]
    fn test_kinesthetic_experiments_rank_first() {
        let agent = ScienceAgent::new();
        let resources = agent
            .suggest_resources("Cells", Some(LearningStyle::Kinesthetic), None)
            .unwrap();
        assert_eq!(resources[0].title, "Hands-on Cells Experiments");
    }

    #[test]
    fn test_chemistry_connection_mentions_materials_for_upper_grades() {
        let agent = ScienceAgent::new();
        let connection = agent
            .entrepreneurship_connection("Chemistry Fundamentals", GradeLevel::Grade(12))
            .unwrap();
        assert!(connection.narrative.contains("new materials"));
        assert_eq!(connection.example_business_applications.len(), 3);
    }

    #[test]
    fn test_quiz_for_known_topic() {
        let agent = ScienceAgent::new();
        let quiz = agent
            .generate_content("Ecosystems", ContentType::Quiz, Difficulty::Intermediate, GradeLevel::Grade(5))
            .unwrap();
        assert!(quiz.body.contains("pass mark"));
        assert_eq!(quiz.metadata.grade_level, GradeLevel::Grade(5));
    }

    #[test]
    fn test_off_taxonomy_topic_rejected() {
        let agent = ScienceAgent::new();
        let err = agent
            .generate_content("Calculus", ContentType::Lesson, Difficulty::Advanced, GradeLevel::Tertiary)
            .unwrap_err();
        assert!(matches!(err, AgentError::UnsupportedTopic { .. }));
    }
}
