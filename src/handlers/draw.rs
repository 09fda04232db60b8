use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/draw/status",
    tag = "draw",
    responses(
        (status = 200, description = "获取抽奖面板状态成功", body = DrawStatusResponse)
    )
)]
/// 获取抽奖面板状态（阶段 / 当前奖品 / 剩余名额 / 候选人数 / 待定名单）
pub async fn get_status(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.status() {
        Ok(status) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": status }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draw/select",
    tag = "draw",
    request_body = SelectPrizeRequest,
    responses(
        (status = 200, description = "选择奖品成功", body = DrawStatusResponse),
        (status = 404, description = "奖品不存在"),
        (status = 409, description = "转动中不能切换奖品")
    )
)]
/// 选择奖品进入抽取
pub async fn select_prize(
    service: web::Data<DrawService>,
    request: web::Json<SelectPrizeRequest>,
) -> Result<HttpResponse> {
    match service.select(request.prize_id) {
        Ok(status) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": status }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draw/deselect",
    tag = "draw",
    responses(
        (status = 200, description = "已离开当前奖品", body = DrawStatusResponse),
        (status = 409, description = "转动中不能离开")
    )
)]
/// 离开当前奖品回到待选状态（转动中拒绝）
pub async fn deselect_prize(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.deselect() {
        Ok(status) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": status }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draw/start",
    tag = "draw",
    responses(
        (status = 200, description = "本轮开始转动", body = DrawStatusResponse),
        (status = 409, description = "没有剩余名额 / 候选池为空 / 已在转动")
    )
)]
/// 开始转动:
/// 1. 实时计算剩余名额与候选池
/// 2. 名额为 0 或候选池为空时拒绝
/// 3. 从已定格状态再次开始会丢弃未落库名单
pub async fn start_round(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.start() {
        Ok(status) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": status }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draw/stop",
    tag = "draw",
    responses(
        (status = 200, description = "本轮定格，返回待定名单", body = StopRoundResponse),
        (status = 409, description = "当前没有转动中的轮次")
    )
)]
/// 定格本轮:
/// 1. 内定规则按登记顺序优先，超出名额时截断并回传被截断人数
/// 2. 剩余名额由候选池均匀洗牌补足
/// 3. 名单定格后等待落库或丢弃
pub async fn stop_round(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.stop() {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draw/commit",
    tag = "draw",
    responses(
        (status = 200, description = "待定名单已落库", body = CommitRoundResponse),
        (status = 409, description = "没有待定名单")
    )
)]
/// 把待定名单落库为中奖记录（整体追加，不存在部分写入）
pub async fn commit_round(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.commit() {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draw/discard",
    tag = "draw",
    responses(
        (status = 200, description = "待定名单已丢弃", body = DrawStatusResponse),
        (status = 409, description = "没有待定名单")
    )
)]
/// 丢弃待定名单（不触碰中奖历史与剩余名额）
pub async fn discard_round(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.discard() {
        Ok(status) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": status }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/draw")
            .route("/status", web::get().to(get_status))
            .route("/select", web::post().to(select_prize))
            .route("/deselect", web::post().to(deselect_prize))
            .route("/start", web::post().to(start_round))
            .route("/stop", web::post().to(stop_round))
            .route("/commit", web::post().to(commit_round))
            .route("/discard", web::post().to(discard_round)),
    );
}
