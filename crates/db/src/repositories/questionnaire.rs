use crate::models::{DbQuestion, DbQuestionnaire};
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;
use visitday_core::models::questionnaire::AnswerInput;

/// Creates a questionnaire with its questions numbered from 1.
pub async fn create_questionnaire(
    pool: &Pool<Postgres>,
    program_id: Uuid,
    title: &str,
    prompts: &[String],
) -> Result<(DbQuestionnaire, Vec<DbQuestion>)> {
    let mut tx = pool.begin().await?;

    let questionnaire = sqlx::query_as::<_, DbQuestionnaire>(
        r#"
        INSERT INTO questionnaires (id, program_id, title, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, program_id, title, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(program_id)
    .bind(title)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    let mut questions = Vec::with_capacity(prompts.len());
    for (position, prompt) in (1..).zip(prompts) {
        let question = sqlx::query_as::<_, DbQuestion>(
            r#"
            INSERT INTO questions (id, questionnaire_id, position, prompt)
            VALUES ($1, $2, $3, $4)
            RETURNING id, questionnaire_id, position, prompt
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(questionnaire.id)
        .bind(position)
        .bind(prompt)
        .fetch_one(&mut *tx)
        .await?;
        questions.push(question);
    }

    tx.commit().await?;
    Ok((questionnaire, questions))
}

pub async fn get_questionnaire_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbQuestionnaire>> {
    let questionnaire = sqlx::query_as::<_, DbQuestionnaire>(
        r#"
        SELECT id, program_id, title, created_at
        FROM questionnaires
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(questionnaire)
}

pub async fn get_questions_by_questionnaire_id(
    pool: &Pool<Postgres>,
    questionnaire_id: Uuid,
) -> Result<Vec<DbQuestion>> {
    let questions = sqlx::query_as::<_, DbQuestion>(
        r#"
        SELECT id, questionnaire_id, position, prompt
        FROM questions
        WHERE questionnaire_id = $1
        ORDER BY position ASC
        "#,
    )
    .bind(questionnaire_id)
    .fetch_all(pool)
    .await?;

    Ok(questions)
}

/// Every question of a program's questionnaires, in report column order
pub async fn get_questions_by_program_id(pool: &Pool<Postgres>, program_id: Uuid) -> Result<Vec<DbQuestion>> {
    let questions = sqlx::query_as::<_, DbQuestion>(
        r#"
        SELECT q.id, q.questionnaire_id, q.position, q.prompt
        FROM questions q
        JOIN questionnaires qn ON qn.id = q.questionnaire_id
        WHERE qn.program_id = $1
        ORDER BY qn.created_at ASC, qn.id ASC, q.position ASC
        "#,
    )
    .bind(program_id)
    .fetch_all(pool)
    .await?;

    Ok(questions)
}

/// Stores a student's answers, replacing earlier responses to the same questions.
pub async fn save_answers(pool: &Pool<Postgres>, student_id: Uuid, answers: &[AnswerInput]) -> Result<usize> {
    let mut tx = pool.begin().await?;

    for answer in answers {
        sqlx::query(
            r#"
            INSERT INTO answers (question_id, student_id, response)
            VALUES ($1, $2, $3)
            ON CONFLICT (question_id, student_id)
            DO UPDATE SET response = EXCLUDED.response
            "#,
        )
        .bind(answer.question_id)
        .bind(student_id)
        .bind(&answer.response)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(answers.len())
}
