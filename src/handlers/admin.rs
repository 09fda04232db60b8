use crate::models::*;
use crate::services::AdminService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/admin/reset",
    tag = "admin",
    responses(
        (status = 200, description = "全量重置成功")
    )
)]
/// 全量重置：参与者、奖品、规则、中奖记录与当前轮次一并清空
pub async fn reset(service: web::Data<AdminService>) -> Result<HttpResponse> {
    match service.reset() {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "活动状态已全部清空"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/snapshot",
    tag = "admin",
    responses(
        (status = 200, description = "导出全量状态成功", body = EventSnapshot)
    )
)]
/// 导出活动全量状态（四个集合作为一个整体），由外部适配器负责落盘
pub async fn export_snapshot(service: web::Data<AdminService>) -> Result<HttpResponse> {
    match service.snapshot() {
        Ok(snapshot) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": snapshot }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/snapshot",
    tag = "admin",
    request_body = EventSnapshot,
    responses(
        (status = 200, description = "恢复全量状态成功")
    )
)]
/// 从快照整体恢复四个集合；当前轮次作废回到 Idle
pub async fn restore_snapshot(
    service: web::Data<AdminService>,
    request: web::Json<EventSnapshot>,
) -> Result<HttpResponse> {
    match service.restore(request.into_inner()) {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "活动状态已恢复"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/reset", web::post().to(reset))
            .route("/snapshot", web::get().to(export_snapshot))
            .route("/snapshot", web::post().to(restore_snapshot)),
    );
}
