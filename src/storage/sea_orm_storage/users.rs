use super::{SeaOrmStorage, db_error};
use crate::entity::prelude::*;
use crate::entity::users::{ActiveModel, Column};
use crate::entity::{batches, encode_id_list};
use crate::errors::{ParcError, Result};
use crate::models::users::{
    entities::User,
    requests::{AccessUpdate, NewUser, UserChanges, UserListQuery},
    responses::UserListResponse,
};
use crate::utils::sql::contains_literal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 附带批次信息转换为业务模型
    async fn attach_batches(&self, models: Vec<UserModel>) -> Result<Vec<User>> {
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut batches = self.user_batch_ids(&ids).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let user_batches = batches.remove(&m.id).unwrap_or_default();
                m.into_user(user_batches)
            })
            .collect())
    }

    async fn one_user(&self, model: Option<UserModel>) -> Result<Option<User>> {
        match model {
            Some(m) => Ok(self.attach_batches(vec![m]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 创建用户，用户名即邮箱
    pub async fn create_user_impl(&self, user: NewUser) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(user.email.clone()),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            role: Set(user.role.to_string()),
            status: Set(user.status.to_string()),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            phone: Set(user.phone),
            expertise: Set(user.expertise),
            experience: Set(user.experience),
            college: Set(user.college),
            education: Set(user.education),
            resume_path: Set(user.resume_path),
            access_expiry_date: Set(None),
            must_change_password: Set(user.must_change_password),
            assigned_material_ids: Set("[]".to_string()),
            assigned_assessment_ids: Set("[]".to_string()),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建用户失败"))?;

        Ok(result.into_user(Vec::new()))
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询用户失败: {e}")))?;

        self.one_user(result).await
    }

    /// 通过邮箱获取用户（大小写不敏感）
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询用户失败: {e}")))?;

        self.one_user(result).await
    }

    /// 通过用户名或邮箱获取用户
    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let identifier = identifier.trim();
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier.to_lowercase())),
            )
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询用户失败: {e}")))?;

        self.one_user(result).await
    }

    pub async fn list_users_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = Users::find()
            .filter(Column::Id.is_in(ids.to_vec()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("批量查询用户失败: {e}")))?;

        self.attach_batches(models).await
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(contains_literal(Column::Username, term))
                    .add(contains_literal(Column::Email, term))
                    .add(contains_literal(Column::FirstName, term))
                    .add(contains_literal(Column::LastName, term)),
            );
        }

        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let (models, pagination) = self.fetch_page(select, query.page, query.size).await?;

        Ok(UserListResponse {
            items: self.attach_batches(models).await?,
            pagination,
        })
    }

    /// 更新用户信息
    pub async fn update_user_impl(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        if Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询用户失败: {e}")))?
            .is_none()
        {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        // 邮箱同时是用户名
        if let Some(email) = changes.email {
            model.username = Set(email.clone());
            model.email = Set(email);
        }
        if let Some(role) = changes.role {
            model.role = Set(role.to_string());
        }
        if let Some(status) = changes.status {
            model.status = Set(status.to_string());
        }
        if let Some(first_name) = changes.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(phone) = changes.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(expertise) = changes.expertise {
            model.expertise = Set(Some(expertise));
        }
        if let Some(experience) = changes.experience {
            model.experience = Set(Some(experience));
        }
        if let Some(college) = changes.college {
            model.college = Set(Some(college));
        }
        if let Some(education) = changes.education {
            model.education = Set(Some(education));
        }

        model.update(&self.db).await.map_err(db_error("更新用户失败"))?;

        self.get_user_by_id_impl(id).await
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn set_user_password_impl(
        &self,
        id: i64,
        password_hash: &str,
        must_change_password: bool,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(
                Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash.to_string()),
            )
            .col_expr(
                Column::MustChangePassword,
                sea_orm::sea_query::Expr::value(must_change_password),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("更新密码失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 写入访问窗口计算结果
    pub async fn update_user_access_impl(
        &self,
        id: i64,
        update: AccessUpdate,
    ) -> Result<Option<User>> {
        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            status: Set(update.status.to_string()),
            access_expiry_date: Set(update.access_expiry_date.map(|d| d.timestamp())),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(hash) = update.password_hash {
            model.password_hash = Set(hash);
            model.must_change_password = Set(true);
        }

        match model.update(&self.db).await {
            Ok(_) => self.get_user_by_id_impl(id).await,
            Err(sea_orm::DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(ParcError::database_operation(format!(
                "更新访问窗口失败: {e}"
            ))),
        }
    }

    pub async fn set_user_resume_impl(&self, id: i64, resume_path: &str) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(
                Column::ResumePath,
                sea_orm::sea_query::Expr::value(resume_path.to_string()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("保存简历失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn get_user_resume_path_impl(&self, id: i64) -> Result<Option<String>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.and_then(|m| m.resume_path))
    }

    pub async fn assign_materials_impl(
        &self,
        user_id: i64,
        material_ids: &[i64],
    ) -> Result<Option<User>> {
        let result = Users::update_many()
            .col_expr(
                Column::AssignedMaterialIds,
                sea_orm::sea_query::Expr::value(encode_id_list(material_ids)),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("分配资料失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_user_by_id_impl(user_id).await
    }

    pub async fn assign_assessments_impl(
        &self,
        user_id: i64,
        assessment_ids: &[i64],
    ) -> Result<Option<User>> {
        let result = Users::update_many()
            .col_expr(
                Column::AssignedAssessmentIds,
                sea_orm::sea_query::Expr::value(encode_id_list(assessment_ids)),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("分配测评失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_user_by_id_impl(user_id).await
    }

    /// 学员所在批次的课程名称，去重并按名称排序
    pub async fn list_student_course_names_impl(&self, user_id: i64) -> Result<Vec<String>> {
        let batch_ids = self
            .user_batch_ids(&[user_id])
            .await?
            .remove(&user_id)
            .unwrap_or_default();
        if batch_ids.is_empty() {
            return Ok(Vec::new());
        }

        let course_ids: Vec<i64> = Batches::find()
            .filter(batches::Column::Id.is_in(batch_ids))
            .all(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("查询批次失败: {e}")))?
            .into_iter()
            .map(|b| b.course_id)
            .collect();

        let mut names: Vec<String> = self.course_names(&course_ids).await?.into_values().collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| ParcError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }
}
