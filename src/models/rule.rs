use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// 内定规则：声明某参与者必得某奖品。
/// 登记顺序即优先顺序；同一奖品可以登记多条规则。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RiggedRule {
    pub prize_id: Uuid,
    pub participant_id: String,
}

/// 登记内定规则请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddRuleRequest {
    pub prize_id: Uuid,
    pub participant_id: String,
}

/// 按 (奖品, 参与者) 对删除规则
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RemoveRuleRequest {
    pub prize_id: Uuid,
    pub participant_id: String,
}

/// 规则展示信息（解析出奖品与参与者名称）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RuleResponse {
    pub prize_id: Uuid,
    pub prize_name: String,
    pub participant_id: String,
    pub participant_name: String,
}
