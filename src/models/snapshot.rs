use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Participant, Prize, RiggedRule, WinnerRecord};

/// 活动全量状态快照。
/// 四个集合作为一个整体导出 / 恢复，负责落盘的适配器不得拆开保存，
/// 否则跨会话无法保证「一人一奖」与名额上限。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EventSnapshot {
    pub participants: Vec<Participant>,
    pub prizes: Vec<Prize>,
    pub rigged_rules: Vec<RiggedRule>,
    pub winners: Vec<WinnerRecord>,
}
