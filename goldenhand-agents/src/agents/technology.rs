//! Technology Architect, the builtin technology agent.

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
    Arc::new(TechnologyAgent::new())
}

#[derive(Debug)]
pub struct TechnologyAgent {
    vocabulary: HashSet<String>,
}

impl TechnologyAgent {
    pub fn new() -> Self {
        TechnologyAgent {
            vocabulary: common::build_vocabulary(&PROFILE),
        }
    }
}

impl Default for TechnologyAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl SubjectAgent for TechnologyAgent {
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
    subject: "technology",
    name: "Technology Architect",
    description: "Specialized agent for technology education",
    topics_by_grade: [
        &["Basic Computer Skills", "Digital Storytelling", "Introduction to Coding", "Online Safety"],
        &["Computer Parts", "Digital Art", "Simple Programming", "Internet Basics"],
        &["Word Processing", "Block Coding", "Digital Communication", "Responsible Technology Use"],
        &["Spreadsheet Basics", "Animation", "Computational Thinking", "Digital Citizenship"],
        &["Presentation Software", "Game Design Basics", "Introduction to Algorithms", "Digital Research"],
        &["Digital Media", "Website Basics", "Programming Concepts", "Data Collection"],
        &["Digital Design", "Web Development", "Programming with Python", "Data Analysis"],
        &["App Design", "Advanced Web Development", "Programming Projects", "Digital Solutions"],
        &["Computer Science Principles", "Web Applications", "Python Programming", "Database Basics"],
        &["Software Development", "Full Stack Development", "Data Structures", "User Experience Design"],
        &["Mobile App Development", "Advanced Programming", "Databases", "AI and Machine Learning Basics"],
        &["Entrepreneurial Technology", "Software Engineering", "Systems Design", "Emerging Technologies"],
    ],
    // Scan order matters: "machine learning" must match before "art",
    // "presentation" before "software".
    categories: &[
        ("web", "web development"),
        ("html", "web development"),
        ("stack", "web development"),
        ("app", "app development"),
        ("mobile", "app development"),
        ("artificial intelligence", "artificial intelligence"),
        ("machine learning", "artificial intelligence"),
        ("data", "data"),
        ("sql", "data"),
        ("spreadsheet", "data"),
        ("database", "data"),
        ("presentation", "digital literacy"),
        ("programming", "programming"),
        ("coding", "programming"),
        ("code", "programming"),
        ("algorithm", "programming"),
        ("computational", "programming"),
        ("software", "programming"),
        ("game", "programming"),
        ("system", "programming"),
        ("digital", "digital literacy"),
        ("computer", "digital literacy"),
        ("internet", "digital literacy"),
        ("online", "digital literacy"),
        ("safety", "digital literacy"),
        ("citizenship", "digital literacy"),
        ("design", "digital literacy"),
        ("emerging", "digital literacy"),
        ("animation", "digital literacy"),
        ("media", "digital literacy"),
        ("word", "digital literacy"),
        ("research", "digital literacy"),
        ("storytelling", "digital literacy"),
        ("art", "digital literacy"),
        ("communication", "digital literacy"),
        ("technology", "digital literacy"),
    ],
    qa_rules: &[
        QaRule {
            keywords: &["programming", "code", "coding"],
            answer: "Programming is the process of creating instructions for computers to follow. It involves writing code in languages like Python, JavaScript, or Java to solve problems and build applications.",
            confidence: 0.9,
        },
        QaRule {
            keywords: &["web", "website", "html", "css"],
            answer: "Web development involves creating websites and web applications. HTML is used for structure, CSS for styling, and JavaScript for interactivity. Backend technologies like Python, PHP, or Node.js handle server-side logic.",
            confidence: 0.85,
        },
        QaRule {
            keywords: &["app", "mobile", "android", "ios"],
            answer: "Mobile app development involves creating applications for smartphones and tablets. Android apps are typically built with Java or Kotlin, while iOS apps use Swift or Objective-C. Cross-platform frameworks like React Native or Flutter allow development for both platforms.",
            confidence: 0.85,
        },
        QaRule {
            keywords: &["database", "data", "sql"],
            answer: "Databases store and organize data for applications. SQL (Structured Query Language) is used to manage relational databases like MySQL or PostgreSQL. NoSQL databases like MongoDB store data in different formats and are often used for large-scale applications.",
            confidence: 0.85,
        },
        QaRule {
            keywords: &["ai", "artificial intelligence", "machine learning"],
            answer: "Artificial Intelligence (AI) enables computers to perform tasks that typically require human intelligence. Machine Learning is a subset of AI that allows systems to learn from data and improve over time without explicit programming.",
            confidence: 0.8,
        },
    ],
    generic_answer: "I'm not sure about the answer to this specific technology question. Could you provide more details or rephrase it?",
    practice_note: "Cement each concept with hands-on coding practice.",
    project_scenario: "Apply your knowledge of {topic} to develop a digital solution to a real-world problem. Pick a user with a concrete need, then design, build, and demo the tool that serves them.",
    rubric_focus: "Technical implementation",
    segment_minutes: 110,
    catalog: &[
        CatalogEntry {
            title: "freeCodeCamp",
            description: "Free interactive coding lessons on {topic}",
            url: "https://www.freecodecamp.org/",
            kind: ResourceKind::Interactive,
            difficulty: Difficulty::Beginner,
            learning_style: None,
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "W3Schools",
            description: "Web development tutorials and references",
            url: "https://www.w3schools.com/",
            kind: ResourceKind::Tutorial,
            difficulty: Difficulty::Intermediate,
            learning_style: None,
            categories: &["web development", "programming"],
            tags: &[],
        },
        CatalogEntry {
            title: "GitHub Learning Lab",
            description: "Interactive courses on coding and development",
            url: "https://lab.github.com/",
            kind: ResourceKind::Interactive,
            difficulty: Difficulty::Intermediate,
            learning_style: None,
            categories: &["programming"],
            tags: &[],
        },
        CatalogEntry {
            title: "Tech Entrepreneurship",
            description: "Learn how to build a tech startup",
            url: "#",
            kind: ResourceKind::Course,
            difficulty: Difficulty::Intermediate,
            learning_style: None,
            categories: &[],
            tags: &["entrepreneurship"],
        },
        CatalogEntry {
            title: "Visual Tech Tutorials",
            description: "Visual explanations of {topic} with diagrams and videos",
            url: "#",
            kind: ResourceKind::Video,
            difficulty: Difficulty::Intermediate,
            learning_style: Some(LearningStyle::Visual),
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "{topic} Explained - Tech Podcast",
            description: "Audio explanations of {topic} concepts",
            url: "#",
            kind: ResourceKind::Audio,
            difficulty: Difficulty::Intermediate,
            learning_style: Some(LearningStyle::Auditory),
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "Hands-on {topic} Projects",
            description: "Interactive projects to learn {topic} by doing",
            url: "#",
            kind: ResourceKind::Project,
            difficulty: Difficulty::Intermediate,
            learning_style: Some(LearningStyle::Kinesthetic),
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "{topic} for Beginners",
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
            title: "South African {topic} Community",
            description: "Connect with local developers and entrepreneurs interested in {topic}",
            url: "#",
            kind: ResourceKind::Community,
            difficulty: Difficulty::Intermediate,
            learning_style: None,
            categories: &[],
            tags: &[],
        },
        CatalogEntry {
            title: "From Code to Company: Building a {topic} Startup",
            description: "Learn how to turn your {topic} skills into a viable business",
            url: "#",
            kind: ResourceKind::Course,
            difficulty: Difficulty::Intermediate,
            learning_style: None,
            categories: &[],
            tags: &["entrepreneurship", "startup", "business"],
        },
    ],
    connections: &[
        ConnectionEntry {
            topics: &["web"],
            spec: ConnectionSpec {
                narratives: [
                    "Making simple pages is how shops and clubs first get online, and you can help them do it.",
                    "Building websites lets you put school clubs and local shops online, a service many will pay for.",
                    "Web development skills enable you to create websites and web applications for businesses and organizations. A portfolio of live sites is often the first product of a young agency.",
                ],
                applications: [
                    &["Make a page about your class project", "Design a poster-style page for a school event"],
                    &["Build a site for a school club", "Create a simple online menu for a local shop"],
                    &["Creating websites for local businesses", "Developing e-commerce platforms", "Building web applications for specific industries"],
                ],
            },
        },
        ConnectionEntry {
            topics: &["mobile", "app"],
            spec: ConnectionSpec {
                narratives: [
                    "Apps are the little programs on phones. Spotting what an app could fix around you is the first step.",
                    "Designing simple apps lets you solve everyday problems for your school or neighbourhood.",
                    "Mobile app development allows you to create applications that solve problems for smartphone users. Shipping one well is a startup in itself.",
                ],
                applications: [
                    &["Sketch an app that helps your class", "Test a homework reminder idea with friends"],
                    &["Prototype an app for a school need", "Map out a delivery idea for your area"],
                    &["Creating apps for businesses to reach customers", "Developing solutions for specific local challenges", "Building tools for other businesses"],
                ],
            },
        },
        ConnectionEntry {
            topics: &["programming", "coding", "software", "algorithm"],
            spec: ConnectionSpec {
                narratives: [
                    "Giving a computer step-by-step instructions is like writing a recipe, and good recipes can be sold.",
                    "Writing programs lets you automate chores and build small tools people at school actually use.",
                    "Programming skills are the foundation for creating software solutions to various problems. Consultancies and products alike are built on them.",
                ],
                applications: [
                    &["Program a game friends want to play", "Automate a classroom chore"],
                    &["Write a tool that speeds up homework tasks", "Build a scorekeeper for school sport"],
                    &["Developing custom software for businesses", "Creating automation tools", "Building data analysis solutions"],
                ],
            },
        },
        ConnectionEntry {
            topics: &["data", "database", "spreadsheet"],
            spec: ConnectionSpec {
                narratives: [
                    "Counting and sorting information shows you patterns, like which break-time snack runs out first.",
                    "Organizing numbers in spreadsheets helps clubs and small shops see what works and what wastes money.",
                    "Data analysis skills allow you to help businesses make better decisions based on their data. Many consultancies start with one good dashboard.",
                ],
                applications: [
                    &["Chart which snacks sell fastest", "Track library book favourites"],
                    &["Keep a sales sheet for a school stall", "Report which fundraiser earned most"],
                    &["Analyzing customer data for businesses", "Creating dashboards and reports", "Optimizing business operations"],
                ],
            },
        },
        ConnectionEntry {
            topics: &["artificial intelligence", "machine learning", "emerging"],
            spec: ConnectionSpec {
                narratives: [
                    "Some programs learn from examples, the way you learn to spot a friend's handwriting.",
                    "Machine learning lets software improve with data, which powers tools from photo sorting to homework helpers.",
                    "AI skills enable you to create intelligent systems that can automate tasks and provide insights. They are behind some of the fastest-growing ventures today.",
                ],
                applications: [
                    &["Teach a sorting game with examples", "Spot patterns a computer could learn"],
                    &["Train a simple classifier for a science fair", "Use a chatbot to answer club questions"],
                    &["Developing AI-powered customer service solutions", "Creating predictive analytics tools", "Building recommendation systems"],
                ],
            },
        },
    ],
    default_connection: ConnectionSpec {
        narratives: [
            "Even at this early stage, learning technology helps you understand how digital tools can solve problems around you.",
            "At this grade level, you can start creating simple websites, apps, or programs that address needs in your school or community.",
            "Technology skills are essential for modern entrepreneurship, enabling the creation of digital products and services that solve real-world problems.",
        ],
        applications: [
            &["Show a classmate a tool that helps them", "Use a computer to make a chore easier"],
            &["Build a digital notice board for school", "Offer tech help to a local club"],
            &["Developing digital solutions for businesses", "Creating online platforms and services", "Building tools that solve specific problems"],
        ],
    },
};
