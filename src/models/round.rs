use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{Participant, PrizeResponse};
use crate::draw::RoundPhase;

/// 选择奖品进入抽取请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SelectPrizeRequest {
    pub prize_id: Uuid,
}

/// 轮次阶段（对外展示用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhaseName {
    Idle,
    Selected,
    Running,
    Settled,
}

impl From<&RoundPhase> for RoundPhaseName {
    fn from(phase: &RoundPhase) -> Self {
        match phase {
            RoundPhase::Idle => RoundPhaseName::Idle,
            RoundPhase::Selected { .. } => RoundPhaseName::Selected,
            RoundPhase::Running { .. } => RoundPhaseName::Running,
            RoundPhase::Settled { .. } => RoundPhaseName::Settled,
        }
    }
}

/// 抽奖面板状态
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawStatusResponse {
    pub phase: RoundPhaseName,
    /// 当前选中的奖品；Idle 时为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prize: Option<PrizeResponse>,
    /// 当前奖品的剩余名额（实时按中奖记录计算）
    pub remaining_slots: u32,
    /// 还未中过奖的参与者人数
    pub eligible_count: usize,
    /// 已定格、尚未落库的本轮名单
    pub pending: Vec<Participant>,
    /// 因名额不足被截断的内定人数
    pub dropped_forced: usize,
}

/// 定格一轮后的待定名单
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StopRoundResponse {
    /// 本轮名单：内定在前（按登记顺序），随机在后
    pub winners: Vec<Participant>,
    /// 因名额不足被截断的内定人数，> 0 时应提示主持人
    pub dropped_forced: usize,
}

/// 落库结果
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommitRoundResponse {
    pub committed: Vec<super::WinnerRecordResponse>,
    /// 落库后该奖品的剩余名额
    pub remaining_slots: u32,
}
