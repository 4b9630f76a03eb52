use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 测评类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export, export_to = "assessment.ts")]
pub enum AssessmentType {
    Test,
    Assignment,
}

impl AssessmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentType::Test => "TEST",
            AssessmentType::Assignment => "ASSIGNMENT",
        }
    }
}

impl std::str::FromStr for AssessmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TEST" => Ok(AssessmentType::Test),
            "ASSIGNMENT" => Ok(AssessmentType::Assignment),
            _ => Err(format!("Invalid assessment type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct AssessmentQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// 正确选项下标，作业类题目可为空
    #[serde(default)]
    pub correct_option: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assessment.ts")]
pub struct Assessment {
    pub id: i64,
    pub title: String,
    pub course: i64,
    pub course_name: String,
    pub material: Option<i64>,
    #[serde(rename = "type")]
    pub assessment_type: AssessmentType,
    pub questions: Vec<AssessmentQuestion>,
    pub max_score: Option<i32>,
    pub created_by: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assessment {
    /// 所有题目都有标准答案时才能自动判分
    pub fn is_auto_gradable(&self) -> bool {
        !self.questions.is_empty() && self.questions.iter().all(|q| q.correct_option.is_some())
    }

    /// 按题目顺序比对答案，返回答对数量
    pub fn grade(&self, answers: &[Option<usize>]) -> i32 {
        self.questions
            .iter()
            .zip(answers.iter())
            .filter(|(question, answer)| {
                question.correct_option.is_some() && question.correct_option == **answer
            })
            .count() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: Option<usize>) -> AssessmentQuestion {
        AssessmentQuestion {
            question: "Which keyword declares an immutable binding?".to_string(),
            options: vec!["let".to_string(), "var".to_string(), "mut".to_string()],
            correct_option: correct,
        }
    }

    fn assessment(questions: Vec<AssessmentQuestion>) -> Assessment {
        Assessment {
            id: 1,
            title: "Basics".to_string(),
            course: 1,
            course_name: "Rust".to_string(),
            material: None,
            assessment_type: AssessmentType::Test,
            questions,
            max_score: None,
            created_by: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_grade_counts_matching_answers() {
        let a = assessment(vec![question(Some(0)), question(Some(2)), question(Some(1))]);
        assert!(a.is_auto_gradable());
        assert_eq!(a.grade(&[Some(0), Some(1), Some(1)]), 2);
        // 少答的题目不得分
        assert_eq!(a.grade(&[Some(0)]), 1);
        assert_eq!(a.grade(&[None, None, None]), 0);
    }

    #[test]
    fn test_assignment_without_keys_is_not_gradable() {
        let a = assessment(vec![question(None)]);
        assert!(!a.is_auto_gradable());
        assert!(!assessment(vec![]).is_auto_gradable());
    }
}
