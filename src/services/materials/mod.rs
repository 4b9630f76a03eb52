pub mod content;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::materials::requests::{MaterialListParams, UpdateMaterialRequest};
use crate::storage::Storage;

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取资料列表
    pub async fn list_materials(
        &self,
        query: MaterialListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_materials(self, query, request).await
    }

    // 上传资料
    pub async fn upload_material(
        &self,
        payload: Multipart,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        upload::upload_material(self, payload, request).await
    }

    pub async fn get_material(
        &self,
        material_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_material(self, material_id, request).await
    }

    // 读取资料文件
    pub async fn material_content(
        &self,
        material_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        content::material_content(self, material_id, request).await
    }

    pub async fn update_material(
        &self,
        material_id: i64,
        body: UpdateMaterialRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_material(self, material_id, body, request).await
    }

    pub async fn delete_material(
        &self,
        material_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_material(self, material_id, request).await
    }
}
