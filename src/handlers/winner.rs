use crate::models::*;
use crate::services::WinnerService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/winners/history",
    tag = "winner",
    responses(
        (status = 200, description = "获取分组中奖名单成功", body = [PrizeWinnersGroup])
    )
)]
/// 按奖品分组的中奖名单（等级低的奖项在前，组内新中奖的在前）
pub async fn get_history(service: web::Data<WinnerService>) -> Result<HttpResponse> {
    match service.history() {
        Ok(groups) => Ok(HttpResponse::Ok().json(ApiResponse::success(groups))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/winners/records",
    tag = "winner",
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取中奖记录成功")
    )
)]
/// 分页获取中奖记录（倒序）
pub async fn get_records(
    service: web::Data<WinnerService>,
    query: web::Query<WinnerRecordQuery>,
) -> Result<HttpResponse> {
    match service.records(&query.into_inner()) {
        Ok(page) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": page }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn winner_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/winners")
            .route("/history", web::get().to(get_history))
            .route("/records", web::get().to(get_records)),
    );
}
