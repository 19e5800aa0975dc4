use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const TABLES: &[(&str, &str)] = &[
    (
        "departments",
        r#"
        CREATE TABLE IF NOT EXISTS departments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "programs",
        r#"
        CREATE TABLE IF NOT EXISTS programs (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            department_id UUID NOT NULL REFERENCES departments(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            default_appointment_length INTEGER NOT NULL,
            held_on_dates DATE[] NOT NULL DEFAULT '{}',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_appointment_length CHECK (default_appointment_length > 0)
        );
        "#,
    ),
    (
        "vips",
        r#"
        CREATE TABLE IF NOT EXISTS vips (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            program_id UUID NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            title VARCHAR(255) NULL,
            profile_url TEXT NULL,
            ranking INTEGER NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT vips_program_name_key UNIQUE (program_id, name)
        );
        "#,
    ),
    (
        "students",
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            program_id UUID NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
            email VARCHAR(255) NOT NULL,
            first_name VARCHAR(255) NULL,
            last_name VARCHAR(255) NULL,
            umid VARCHAR(32) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT students_program_email_key UNIQUE (program_id, email)
        );
        "#,
    ),
    (
        "appointments",
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            program_id UUID NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
            vip_id UUID NOT NULL REFERENCES vips(id) ON DELETE CASCADE,
            student_id UUID NULL REFERENCES students(id) ON DELETE SET NULL,
            start_time TIMESTAMP NOT NULL,
            end_time TIMESTAMP NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT appointments_vip_start_key UNIQUE (vip_id, start_time)
        );
        "#,
    ),
    (
        "appointment_selections",
        r#"
        CREATE TABLE IF NOT EXISTS appointment_selections (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            appointment_id UUID NOT NULL,
            user_id UUID NOT NULL,
            action VARCHAR(16) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_selection_action CHECK (action IN ('selected', 'deleted'))
        );
        "#,
    ),
    (
        "questionnaires",
        r#"
        CREATE TABLE IF NOT EXISTS questionnaires (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            program_id UUID NOT NULL REFERENCES programs(id) ON DELETE CASCADE,
            title VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "questions",
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            questionnaire_id UUID NOT NULL REFERENCES questionnaires(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            prompt TEXT NOT NULL
        );
        "#,
    ),
    (
        "answers",
        r#"
        CREATE TABLE IF NOT EXISTS answers (
            question_id UUID NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
            student_id UUID NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            response TEXT NOT NULL,
            PRIMARY KEY (question_id, student_id)
        );
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_programs_department_id ON programs(department_id)",
    "CREATE INDEX IF NOT EXISTS idx_vips_program_id ON vips(program_id)",
    "CREATE INDEX IF NOT EXISTS idx_students_program_id ON students(program_id)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_program_id ON appointments(program_id)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_student_id ON appointments(student_id)",
    "CREATE INDEX IF NOT EXISTS idx_appointments_start_time ON appointments(start_time)",
    "CREATE INDEX IF NOT EXISTS idx_appointment_selections_appointment_id ON appointment_selections(appointment_id)",
    "CREATE INDEX IF NOT EXISTS idx_questions_questionnaire_id ON questions(questionnaire_id)",
    "CREATE INDEX IF NOT EXISTS idx_answers_student_id ON answers(student_id)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for (table, ddl) in TABLES {
        tracing::debug!("Creating table {}", table);
        sqlx::query(ddl).execute(pool).await?;
    }

    for ddl in INDEXES {
        sqlx::query(ddl).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
