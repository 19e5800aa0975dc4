use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Questionnaire {
    pub id: Uuid,
    pub program_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub questionnaire_id: Uuid,
    pub position: i32,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: Uuid,
    pub student_id: Uuid,
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestionnaireRequest {
    pub title: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    pub id: Uuid,
    pub program_id: Uuid,
    pub title: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerInput {
    pub question_id: Uuid,
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponsesRequest {
    pub student_id: Uuid,
    pub answers: Vec<AnswerInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponsesResponse {
    pub questionnaire_id: Uuid,
    pub student_id: Uuid,
    pub saved: usize,
}
