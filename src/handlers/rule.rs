use crate::models::*;
use crate::services::RuleService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/rules",
    tag = "rule",
    responses(
        (status = 200, description = "获取内定规则列表成功", body = [RuleResponse])
    )
)]
/// 获取内定规则列表（登记顺序；指向已删除奖品或参与者的规则不展示）
pub async fn get_rules(service: web::Data<RuleService>) -> Result<HttpResponse> {
    match service.list() {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/rules",
    tag = "rule",
    request_body = AddRuleRequest,
    responses(
        (status = 200, description = "登记内定规则成功", body = RuleResponse),
        (status = 404, description = "奖品或参与者不存在")
    )
)]
/// 登记内定规则：该参与者在对应奖品的抽取中优先于随机选取
pub async fn add_rule(
    service: web::Data<RuleService>,
    request: web::Json<AddRuleRequest>,
) -> Result<HttpResponse> {
    match service.add(request.into_inner()) {
        Ok(rule) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": rule }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/rules",
    tag = "rule",
    params(
        ("prize_id" = Uuid, Query, description = "奖品ID"),
        ("participant_id" = String, Query, description = "参与者ID")
    ),
    responses(
        (status = 200, description = "删除内定规则成功"),
        (status = 404, description = "规则不存在")
    )
)]
/// 按 (奖品, 参与者) 对删除内定规则
pub async fn remove_rule(
    service: web::Data<RuleService>,
    query: web::Query<RemoveRuleRequest>,
) -> Result<HttpResponse> {
    let request = query.into_inner();
    match service.remove(request.prize_id, &request.participant_id) {
        Ok(removed) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": { "removed": removed }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn rule_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rules")
            .route("", web::get().to(get_rules))
            .route("", web::post().to(add_rule))
            .route("", web::delete().to(remove_rule)),
    );
}
