use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// 奖品。
/// - `level` 仅用于展示排序，抽取逻辑不使用
/// - `count` 为该奖品的中奖名额总数，恒为正
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Prize {
    pub id: Uuid,
    /// 奖品名称
    pub name: String,
    /// 图片引用，后端不解析其内容
    pub image: String,
    /// 展示等级
    pub level: i32,
    /// 名额总数
    pub count: u32,
}

/// 新建奖品请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePrizeRequest {
    pub name: String,
    /// 名额总数，必须 >= 1
    pub count: u32,
    #[serde(default)]
    pub image: Option<String>,
    /// 缺省时按现有奖品数顺延
    #[serde(default)]
    pub level: Option<i32>,
}

/// 奖品展示信息（带已产生的中奖数）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub level: i32,
    pub count: u32,
    /// 已落库的中奖人数
    pub won_count: usize,
    /// 剩余名额 = count - won_count
    pub remaining: u32,
    /// 名额是否已抽完
    pub completed: bool,
}

impl PrizeResponse {
    pub fn from_prize(prize: &Prize, won_count: usize) -> Self {
        let remaining = prize.count.saturating_sub(won_count as u32);
        Self {
            id: prize.id,
            name: prize.name.clone(),
            image: prize.image.clone(),
            level: prize.level,
            count: prize.count,
            won_count,
            remaining,
            completed: remaining == 0,
        }
    }
}
