use crate::models::*;
use crate::services::PrizeService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "prize",
    responses(
        (status = 200, description = "获取奖品列表成功", body = [PrizeResponse])
    )
)]
/// 获取奖品列表（带中奖进度，按等级从高到低）
pub async fn get_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.list() {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/prizes",
    tag = "prize",
    request_body = CreatePrizeRequest,
    responses(
        (status = 200, description = "新建奖品成功", body = PrizeResponse),
        (status = 400, description = "请求参数错误")
    )
)]
/// 新建奖品（名额必须为正，等级缺省时顺延）
pub async fn create_prize(
    service: web::Data<PrizeService>,
    request: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.create(request.into_inner()) {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/prizes/{id}",
    tag = "prize",
    params(
        ("id" = Uuid, Path, description = "奖品ID")
    ),
    responses(
        (status = 200, description = "删除奖品成功"),
        (status = 400, description = "该奖品正在转动中"),
        (status = 404, description = "奖品不存在")
    )
)]
/// 删除奖品。转动中的奖品不能删；中奖记录保留。
pub async fn delete_prize(
    service: web::Data<PrizeService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match service.delete(path.into_inner()) {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({ "success": true }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn prize_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/prizes")
            .route("", web::get().to(get_prizes))
            .route("", web::post().to(create_prize))
            .route("/{id}", web::delete().to(delete_prize)),
    );
}
