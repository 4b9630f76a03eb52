use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttemptService;
use crate::models::{
    ApiResponse, ErrorCode,
    assessments::entities::Assessment,
    attempts::requests::{CreateAttemptRequest, NewAttempt},
};
use crate::services::{current_user, internal_error};

/// 计算得分：提供答案且测评有完整答案键时自动判分，否则使用提交的分数
fn resolve_score(assessment: &Assessment, body: &CreateAttemptRequest) -> Result<i32, String> {
    if let Some(answers) = &body.answers {
        if answers.len() > assessment.questions.len() {
            return Err("More answers than questions were submitted.".to_string());
        }
        let out_of_range = answers
            .iter()
            .zip(&assessment.questions)
            .any(|(answer, question)| answer.is_some_and(|a| a >= question.options.len()));
        if out_of_range {
            return Err("An answer refers to an option that does not exist.".to_string());
        }
        if assessment.is_auto_gradable() {
            return Ok(assessment.grade(answers));
        }
    }

    let score = body
        .score
        .ok_or("A score is required for assessments that cannot be graded automatically.")?;
    if score < 0 {
        return Err("Score cannot be negative.".to_string());
    }
    if let Some(max_score) = assessment.max_score
        && score > max_score
    {
        return Err(format!("Score cannot exceed the maximum of {max_score}."));
    }
    Ok(score)
}

pub async fn submit_attempt(
    service: &AttemptService,
    body: CreateAttemptRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let student = current_user(request)?;
    let storage = service.get_storage(request)?;

    // 令牌缓存中的用户可能早于最近一次分配，以数据库为准
    let assigned = match storage.get_user_by_id(student.id).await {
        Ok(Some(user)) => user.assigned_assessments,
        Ok(None) => Vec::new(),
        Err(e) => return Ok(internal_error("Attempt submission failed", e)),
    };
    if !assigned.contains(&body.assessment) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "This assessment has not been assigned to you.",
        )));
    }

    let assessment = match storage.get_assessment_by_id(body.assessment).await {
        Ok(Some(assessment)) => assessment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssessmentNotFound,
                "Assessment not found",
            )));
        }
        Err(e) => return Ok(internal_error("Attempt submission failed", e)),
    };

    let score = match resolve_score(&assessment, &body) {
        Ok(score) => score,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::AttemptInvalid, msg)));
        }
    };

    let attempt = NewAttempt {
        student_id: student.id,
        assessment_id: assessment.id,
        score,
        answers: body.answers,
    };

    match storage.create_attempt(attempt).await {
        Ok(attempt) => {
            info!(
                "Student {} scored {} on assessment {}",
                student.id, attempt.score, assessment.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                attempt,
                "Attempt submitted successfully",
            )))
        }
        Err(e) => Ok(internal_error("Attempt submission failed", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessments::entities::{AssessmentQuestion, AssessmentType};

    fn assessment(keys: &[Option<usize>], max_score: Option<i32>) -> Assessment {
        Assessment {
            id: 4,
            title: "Ownership".to_string(),
            course: 1,
            course_name: "Rust".to_string(),
            material: None,
            assessment_type: AssessmentType::Test,
            questions: keys
                .iter()
                .map(|key| AssessmentQuestion {
                    question: "?".to_string(),
                    options: vec!["a".to_string(), "b".to_string()],
                    correct_option: *key,
                })
                .collect(),
            max_score,
            created_by: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn request(score: Option<i32>, answers: Option<Vec<Option<usize>>>) -> CreateAttemptRequest {
        CreateAttemptRequest {
            assessment: 4,
            score,
            answers,
        }
    }

    #[test]
    fn test_auto_graded_score_ignores_submitted_score() {
        let a = assessment(&[Some(0), Some(1)], None);
        let score = resolve_score(&a, &request(Some(99), Some(vec![Some(0), Some(0)]))).unwrap();
        assert_eq!(score, 1);
    }

    #[test]
    fn test_manual_score_is_bounded() {
        let a = assessment(&[None], Some(10));
        assert_eq!(resolve_score(&a, &request(Some(7), None)).unwrap(), 7);
        assert!(resolve_score(&a, &request(Some(11), None)).is_err());
        assert!(resolve_score(&a, &request(Some(-1), None)).is_err());
        assert!(resolve_score(&a, &request(None, None)).is_err());
    }

    #[test]
    fn test_answers_must_fit_questions() {
        let a = assessment(&[Some(0)], None);
        assert!(resolve_score(&a, &request(None, Some(vec![Some(0), Some(1)]))).is_err());
        assert!(resolve_score(&a, &request(None, Some(vec![Some(5)]))).is_err());
    }
}
