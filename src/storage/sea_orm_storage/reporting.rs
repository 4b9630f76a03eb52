use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::{bills, student_attempts, trainer_applications, users};
use crate::errors::{ParcError, Result};
use crate::models::{
    applications::entities::ApplicationStatus,
    bills::entities::BillStatus,
    reporting::responses::{LeaderboardEntry, OverviewResponse},
    users::entities::UserRole,
};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QuerySelect, RelationTrait,
};
use std::collections::HashMap;

/// 汇总每个学员的总分与作答次数，按总分倒序，同分按姓名排序
fn rank_students(rows: Vec<(i64, i32)>, names: &HashMap<i64, String>) -> Vec<LeaderboardEntry> {
    let mut totals: HashMap<i64, (i64, i64)> = HashMap::new();
    for (student_id, score) in rows {
        let entry = totals.entry(student_id).or_default();
        entry.0 += i64::from(score);
        entry.1 += 1;
    }

    let mut entries: Vec<LeaderboardEntry> = totals
        .into_iter()
        .map(|(student_id, (total_score, attempts))| LeaderboardEntry {
            student_id,
            student_name: names.get(&student_id).cloned().unwrap_or_default(),
            total_score,
            attempts,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.total_score
            .cmp(&a.total_score)
            .then_with(|| a.student_name.cmp(&b.student_name))
            .then_with(|| a.student_id.cmp(&b.student_id))
    });
    entries
}

impl SeaOrmStorage {
    /// 只统计当前角色仍为学员的账号；分数在内存中累加，不依赖各数据库 SUM 的返回类型
    pub async fn leaderboard_impl(&self) -> Result<Vec<LeaderboardEntry>> {
        let rows: Vec<(i64, i32)> = StudentAttempts::find()
            .select_only()
            .column(student_attempts::Column::StudentId)
            .column(student_attempts::Column::Score)
            .join(JoinType::InnerJoin, student_attempts::Relation::Student.def())
            .filter(users::Column::Role.eq(UserRole::Student.as_str()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("统计排行榜失败: {e}")))?;

        let student_ids: Vec<i64> = rows.iter().map(|(id, _)| *id).collect();
        let names = self.user_names(&student_ids).await?;

        Ok(rank_students(rows, &names))
    }

    pub async fn overview_counts_impl(&self) -> Result<OverviewResponse> {
        let count_role = |role: UserRole| {
            Users::find()
                .filter(users::Column::Role.eq(role.as_str()))
                .count(&self.db)
        };
        let map_err = |e: sea_orm::DbErr| ParcError::database_operation(format!("统计概览失败: {e}"));

        Ok(OverviewResponse {
            admins: count_role(UserRole::Admin).await.map_err(map_err)? as i64,
            trainers: count_role(UserRole::Trainer).await.map_err(map_err)? as i64,
            students: count_role(UserRole::Student).await.map_err(map_err)? as i64,
            employees: count_role(UserRole::Employee).await.map_err(map_err)? as i64,
            colleges: Colleges::find().count(&self.db).await.map_err(map_err)? as i64,
            courses: Courses::find().count(&self.db).await.map_err(map_err)? as i64,
            batches: Batches::find().count(&self.db).await.map_err(map_err)? as i64,
            materials: Materials::find().count(&self.db).await.map_err(map_err)? as i64,
            pending_applications: TrainerApplications::find()
                .filter(trainer_applications::Column::Status.eq(ApplicationStatus::Pending.as_str()))
                .count(&self.db)
                .await
                .map_err(map_err)? as i64,
            unpaid_bills: Bills::find()
                .filter(bills::Column::Status.eq(BillStatus::Pending.as_str()))
                .count(&self.db)
                .await
                .map_err(map_err)? as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_students_sums_and_orders() {
        let names = HashMap::from([
            (1, "Ada Lovelace".to_string()),
            (2, "Alan Turing".to_string()),
            (3, "Grace Hopper".to_string()),
        ]);
        let rows = vec![(3, 4), (1, 2), (3, 1), (2, 5), (1, 3)];

        let ranked = rank_students(rows, &names);
        let order: Vec<(i64, i64, i64)> = ranked
            .iter()
            .map(|e| (e.student_id, e.total_score, e.attempts))
            .collect();
        // 同为 5 分时按姓名排序
        assert_eq!(order, vec![(1, 5, 2), (2, 5, 1), (3, 5, 2)]);
        assert_eq!(ranked[2].student_name, "Grace Hopper");
    }

    #[test]
    fn test_rank_students_does_not_overflow_i32() {
        let rows = vec![(7, i32::MAX), (7, i32::MAX)];
        let ranked = rank_students(rows, &HashMap::new());
        assert_eq!(ranked[0].total_score, 2 * i64::from(i32::MAX));
        assert_eq!(ranked[0].student_name, "");
    }
}
