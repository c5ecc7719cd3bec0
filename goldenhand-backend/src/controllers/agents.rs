use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use std::collections::HashMap;

use goldenhand_agents::types::{
    ContentRequest, ContentType, Difficulty, GradeLevel, LearningStyle, PerformanceRecord,
    QuestionContext, Subject,
};
use goldenhand_agents::AgentError;

use crate::AppState;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/agents")
            .route("/info", web::get().to(agent_info))
            .route("/learning-path", web::post().to(learning_path))
            .route("/content", web::post().to(content))
            .route("/performance-analysis", web::post().to(performance_analysis))
            .route("/question", web::post().to(question))
            .route("/resources", web::post().to(resources))
            .route("/entrepreneurship", web::post().to(entrepreneurship)),
    );
}

/// Maps the error taxonomy onto HTTP statuses. Bodies always carry the
/// machine tag alongside the message so clients can branch without
/// parsing prose.
fn error_response(err: &AgentError) -> HttpResponse {
    if err.is_client_error() {
        log::debug!("[AGENTS] Rejected request: {}", err);
    } else {
        log::error!("[AGENTS] Request failed: {}", err);
    }

    let body = serde_json::json!({
        "kind": err.kind(),
        "message": err.to_string(),
    });
    match err {
        AgentError::UnsupportedSubject(_)
        | AgentError::UnknownAgentKey(_)
        | AgentError::UnsupportedTopic { .. } => HttpResponse::NotFound().json(body),
        AgentError::UnsupportedContentType(_)
        | AgentError::InvalidActivityRecord(_)
        | AgentError::TooManySubjects { .. } => HttpResponse::BadRequest().json(body),
        AgentError::NoAnswerAvailable => HttpResponse::ServiceUnavailable().json(body),
        AgentError::NotInitialized => HttpResponse::InternalServerError().json(body),
    }
}

async fn agent_info(data: web::Data<AppState>) -> impl Responder {
    match data.integrator.agent_info() {
        Ok(info) => HttpResponse::Ok().json(info),
        Err(err) => error_response(&err),
    }
}

#[derive(Deserialize)]
struct LearningPathRequest {
    student_id: i64,
    grade_level: GradeLevel,
    subjects: Vec<Subject>,
    #[serde(default)]
    prior_knowledge: HashMap<String, HashMap<String, f64>>,
}

async fn learning_path(
    data: web::Data<AppState>,
    body: web::Json<LearningPathRequest>,
) -> impl Responder {
    let request = body.into_inner();
    match data.integrator.generate_learning_path(
        request.student_id,
        request.grade_level,
        &request.subjects,
        &request.prior_knowledge,
    ) {
        Ok(path) => HttpResponse::Ok().json(path),
        Err(err) => error_response(&err),
    }
}

#[derive(Deserialize)]
struct ContentRequestDto {
    subject: Subject,
    topic: String,
    /// Parsed in the handler so unknown values produce a structured
    /// `unsupported_content_type` instead of a serde rejection.
    content_type: String,
    difficulty: Option<Difficulty>,
    grade_level: GradeLevel,
}

async fn content(data: web::Data<AppState>, body: web::Json<ContentRequestDto>) -> impl Responder {
    let dto = body.into_inner();
    let content_type = match dto.content_type.parse::<ContentType>() {
        Ok(parsed) => parsed,
        Err(_) => {
            return error_response(&AgentError::UnsupportedContentType(dto.content_type));
        }
    };

    let request = ContentRequest {
        subject: dto.subject,
        topic: dto.topic,
        content_type,
        difficulty: dto.difficulty.unwrap_or(Difficulty::Intermediate),
        grade_level: dto.grade_level,
    };
    match data.integrator.generate_content(&request) {
        Ok(generated) => HttpResponse::Ok().json(generated),
        Err(err) => error_response(&err),
    }
}

async fn performance_analysis(
    data: web::Data<AppState>,
    body: web::Json<PerformanceRecord>,
) -> impl Responder {
    match data.integrator.analyze_performance(&body.into_inner()) {
        Ok(analysis) => HttpResponse::Ok().json(analysis),
        Err(err) => error_response(&err),
    }
}

#[derive(Deserialize)]
struct QuestionRequest {
    question: String,
    subject: Option<Subject>,
    #[serde(default)]
    context: QuestionContext,
}

async fn question(data: web::Data<AppState>, body: web::Json<QuestionRequest>) -> impl Responder {
    let request = body.into_inner();
    match data
        .integrator
        .answer_question(&request.question, request.subject.as_ref(), &request.context)
    {
        Ok(answer) => HttpResponse::Ok().json(answer),
        Err(err) => error_response(&err),
    }
}

#[derive(Deserialize)]
struct ResourcesRequest {
    subject: Subject,
    topic: String,
    learning_style: Option<LearningStyle>,
    difficulty: Option<Difficulty>,
}

async fn resources(data: web::Data<AppState>, body: web::Json<ResourcesRequest>) -> impl Responder {
    let request = body.into_inner();
    match data.integrator.suggest_resources(
        &request.subject,
        &request.topic,
        request.learning_style,
        request.difficulty,
    ) {
        Ok(found) => HttpResponse::Ok().json(found),
        Err(err) => error_response(&err),
    }
}

#[derive(Deserialize)]
struct ConnectionRequest {
    subject: Subject,
    topic: String,
    grade_level: GradeLevel,
}

async fn entrepreneurship(
    data: web::Data<AppState>,
    body: web::Json<ConnectionRequest>,
) -> impl Responder {
    let request = body.into_inner();
    match data.integrator.entrepreneurship_connection(
        &request.subject,
        &request.topic,
        request.grade_level,
    ) {
        Ok(connection) => HttpResponse::Ok().json(connection),
        Err(err) => error_response(&err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use goldenhand_agents::AgentIntegrator;
    use std::sync::Arc;

    fn test_state() -> web::Data<AppState> {
        let integrator = Arc::new(AgentIntegrator::new());
        integrator.initialize();
        web::Data::new(AppState {
            integrator,
            config: Config {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
        })
    }

    #[actix_web::test]
    async fn test_content_endpoint_attaches_connection() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(config_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/agents/content")
            .set_json(serde_json::json!({
                "subject": "mathematics",
                "topic": "Algebra",
                "content_type": "lesson",
                "grade_level": 10
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["subject"], "mathematics");
        assert_eq!(body["topic"], "Algebra");
        assert!(!body["body"].as_str().unwrap().is_empty());
        let narrative = body["entrepreneurship_connection"]["narrative"]
            .as_str()
            .unwrap();
        assert!(!narrative.is_empty());
    }

    #[actix_web::test]
    async fn test_unknown_content_type_is_a_400() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(config_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/agents/content")
            .set_json(serde_json::json!({
                "subject": "mathematics",
                "topic": "Algebra",
                "content_type": "song",
                "grade_level": 10
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "unsupported_content_type");
    }

    #[actix_web::test]
    async fn test_unknown_subject_is_a_404() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(config_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/agents/question")
            .set_json(serde_json::json!({
                "question": "Who unified the kingdoms?",
                "subject": "history"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "unsupported_subject");
    }

    #[actix_web::test]
    async fn test_learning_path_endpoint() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(config_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/agents/learning-path")
            .set_json(serde_json::json!({
                "student_id": 7,
                "grade_level": 9,
                "subjects": ["mathematics", "technology"],
                "prior_knowledge": {
                    "mathematics": { "Algebra I": 0.9 }
                }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        let segments = body["segments"].as_array().unwrap();
        assert!(!segments.is_empty());
        assert_eq!(segments.last().unwrap()["kind"], "capstone");
        assert!(body["estimated_duration_days"].as_u64().unwrap() > 0);
    }

    #[actix_web::test]
    async fn test_invalid_performance_record_is_a_400() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(config_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/agents/performance-analysis")
            .set_json(serde_json::json!({
                "student_id": 7,
                "subject": "science",
                "activity_type": "quiz",
                "topic": "Cells",
                "score": 12.0,
                "max_score": 10.0
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "invalid_activity_record");
    }

    #[actix_web::test]
    async fn test_question_fanout_names_its_source() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(config_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/agents/question")
            .set_json(serde_json::json!({
                "question": "How can I use technology skills to start a business?"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["source_agent"], "technology_agent");
        assert!(body["confidence"].as_f64().unwrap() > 0.7);
    }

    #[actix_web::test]
    async fn test_resources_and_info_endpoints() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(config_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/agents/resources")
            .set_json(serde_json::json!({
                "subject": "science",
                "topic": "Cells",
                "learning_style": "kinesthetic"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(!body.as_array().unwrap().is_empty());

        let req = test::TestRequest::get().uri("/api/agents/info").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn test_entrepreneurship_endpoint() {
        let app =
            test::init_service(App::new().app_data(test_state()).configure(config_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/agents/entrepreneurship")
            .set_json(serde_json::json!({
                "subject": "mathematics",
                "topic": "Statistics",
                "grade_level": "tertiary"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["subject"], "mathematics");
        assert_eq!(body["grade_level"], "tertiary");
        assert!(!body["example_business_applications"].as_array().unwrap().is_empty());
    }
}
