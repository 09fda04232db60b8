use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Participant, PrizeResponse};

/// 中奖记录。创建后不可变、只增不减，仅全量重置可以清除。
/// `participant` 保存中奖当时的参与者快照。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WinnerRecord {
    pub id: Uuid,
    pub participant: Participant,
    pub prize_id: Uuid,
    pub won_at: DateTime<Utc>,
}

/// 单条中奖记录展示
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WinnerRecordResponse {
    pub id: Uuid,
    pub participant: Participant,
    pub prize_id: Uuid,
    /// 奖品名称；奖品已被删除时为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize_name: Option<String>,
    pub won_at: DateTime<Utc>,
}

impl WinnerRecordResponse {
    pub fn from_record(record: &WinnerRecord, prize_name: Option<String>) -> Self {
        Self {
            id: record.id,
            participant: record.participant.clone(),
            prize_id: record.prize_id,
            prize_name,
            won_at: record.won_at,
        }
    }
}

/// 按奖品分组的中奖名单（等级低的奖项在前，组内新中奖的在前）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeWinnersGroup {
    pub prize: PrizeResponse,
    pub winners: Vec<WinnerRecordResponse>,
}

/// 中奖记录查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct WinnerRecordQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20)
    pub per_page: Option<u32>,
}
