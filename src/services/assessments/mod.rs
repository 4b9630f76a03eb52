pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    assessments::{
        entities::AssessmentQuestion,
        requests::{AssessmentListParams, CreateAssessmentRequest, UpdateAssessmentRequest},
    },
};
use crate::services::internal_error;
use crate::storage::Storage;

pub struct AssessmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssessmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取测评列表，学员只能看到分配给自己的测评
    pub async fn list_assessments(
        &self,
        query: AssessmentListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_assessments(self, query, request).await
    }

    pub async fn create_assessment(
        &self,
        body: CreateAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assessment(self, body, request).await
    }

    pub async fn get_assessment(
        &self,
        assessment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_assessment(self, assessment_id, request).await
    }

    pub async fn update_assessment(
        &self,
        assessment_id: i64,
        body: UpdateAssessmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assessment(self, assessment_id, body, request).await
    }

    pub async fn delete_assessment(
        &self,
        assessment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assessment(self, assessment_id, request).await
    }
}

pub(crate) fn assessment_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::AssessmentNotFound,
        "Assessment not found",
    ))
}

/// 每道题必须有题干和选项，标准答案下标不能越界
pub(crate) fn validate_questions(questions: &[AssessmentQuestion]) -> Result<(), String> {
    for (index, question) in questions.iter().enumerate() {
        let number = index + 1;
        if question.question.trim().is_empty() {
            return Err(format!("Question {number} has no text."));
        }
        if question.options.iter().any(|option| option.trim().is_empty()) {
            return Err(format!("Question {number} has an empty option."));
        }
        if let Some(correct) = question.correct_option
            && correct >= question.options.len()
        {
            return Err(format!(
                "Question {number} has an answer key outside its options."
            ));
        }
    }
    Ok(())
}

/// 课程必须存在；指定资料时资料必须属于该课程
pub(crate) async fn check_course_material(
    storage: &dyn Storage,
    course_id: i64,
    material_id: Option<i64>,
) -> Result<(), HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course does not exist.",
            )));
        }
        Err(e) => return Err(internal_error("Failed to verify course", e)),
    }

    if let Some(material_id) = material_id {
        match storage.get_material_by_id(material_id).await {
            Ok(Some(material)) if material.course_id == course_id => {}
            Ok(Some(_)) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::ValidationFailed,
                    "The material does not belong to the selected course.",
                )));
            }
            Ok(None) => {
                return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::MaterialNotFound,
                    "Material does not exist.",
                )));
            }
            Err(e) => return Err(internal_error("Failed to verify material", e)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: &[&str], correct: Option<usize>) -> AssessmentQuestion {
        AssessmentQuestion {
            question: "What does `?` do?".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_option: correct,
        }
    }

    #[test]
    fn test_validate_questions() {
        assert!(validate_questions(&[question(&["Propagates errors", "Panics"], Some(0))]).is_ok());
        assert!(validate_questions(&[question(&[], None)]).is_ok());
        assert_eq!(
            validate_questions(&[question(&["a"], Some(0)), question(&["a", "b"], Some(2))])
                .unwrap_err(),
            "Question 2 has an answer key outside its options."
        );
        assert!(validate_questions(&[question(&["a", " "], None)]).is_err());
    }
}
