use crate::models::*;
use crate::services::ParticipantService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/participants/import",
    tag = "participant",
    request_body = ImportParticipantsRequest,
    responses(
        (status = 200, description = "导入参与者成功", body = ImportParticipantsResponse),
        (status = 400, description = "请求参数错误")
    )
)]
/// 批量导入参与者名单（表格解析在前端完成，这里只接收行数据）
/// 重复或字段缺失的行会被跳过并在响应里计数
pub async fn import_participants(
    service: web::Data<ParticipantService>,
    request: web::Json<ImportParticipantsRequest>,
) -> Result<HttpResponse> {
    match service.import(request.into_inner().participants) {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/participants",
    tag = "participant",
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取参与者名单成功")
    )
)]
/// 分页获取参与者名单（导入顺序）
pub async fn get_participants(
    service: web::Data<ParticipantService>,
    query: web::Query<ParticipantQuery>,
) -> Result<HttpResponse> {
    match service.list(&query.into_inner()) {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn participant_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/participants")
            .route("/import", web::post().to(import_participants))
            .route("", web::get().to(get_participants)),
    );
}
