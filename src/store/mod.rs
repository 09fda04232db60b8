//! 活动状态存储。
//!
//! 四个集合加当前轮次由单个 RwLock 整体持有；每个服务操作在锁内
//! 完成全部读写，相当于一次事务。落盘交给外部适配器通过快照接口完成。

use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::draw::RoundController;
use crate::error::{AppError, AppResult};
use crate::models::{EventSnapshot, Participant, Prize, RiggedRule, WinnerRecord};

#[derive(Debug, Default)]
pub struct EventState {
    pub participants: Vec<Participant>,
    pub prizes: Vec<Prize>,
    pub rigged_rules: Vec<RiggedRule>,
    pub winners: Vec<WinnerRecord>,
    pub round: RoundController,
}

impl EventState {
    /// 未中过任何奖的参与者（一人至多一条中奖记录的查询侧）
    pub fn eligible_participants(&self) -> Vec<Participant> {
        let won: HashSet<&str> = self
            .winners
            .iter()
            .map(|w| w.participant.id.as_str())
            .collect();
        self.participants
            .iter()
            .filter(|p| !won.contains(p.id.as_str()))
            .cloned()
            .collect()
    }

    pub fn prize(&self, prize_id: Uuid) -> Option<&Prize> {
        self.prizes.iter().find(|p| p.id == prize_id)
    }

    /// 某奖品已落库的中奖人数
    pub fn won_count(&self, prize_id: Uuid) -> usize {
        self.winners.iter().filter(|w| w.prize_id == prize_id).count()
    }

    /// 剩余名额 = 总名额 − 已落库中奖数。每次调用实时计算，
    /// 绝不跨落库缓存，名额上限因此对连续多轮同样成立。
    pub fn remaining_slots(&self, prize: &Prize) -> u32 {
        prize.count.saturating_sub(self.won_count(prize.id) as u32)
    }

    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            participants: self.participants.clone(),
            prizes: self.prizes.clone(),
            rigged_rules: self.rigged_rules.clone(),
            winners: self.winners.clone(),
        }
    }

    /// 整体替换四个集合；轮次是瞬态的，恢复后回到 Idle。
    pub fn restore(&mut self, snapshot: EventSnapshot) {
        self.participants = snapshot.participants;
        self.prizes = snapshot.prizes;
        self.rigged_rules = snapshot.rigged_rules;
        self.winners = snapshot.winners;
        self.round = RoundController::new();
    }

    /// 全量重置：集合与轮次一并清空，不存在部分清除。
    pub fn reset(&mut self) {
        *self = EventState::default();
    }
}

#[derive(Debug, Default)]
pub struct EventStore {
    inner: RwLock<EventState>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> AppResult<RwLockReadGuard<'_, EventState>> {
        self.inner
            .read()
            .map_err(|_| AppError::InternalError("event state lock poisoned".into()))
    }

    pub fn write(&self) -> AppResult<RwLockWriteGuard<'_, EventState>> {
        self.inner
            .write()
            .map_err(|_| AppError::InternalError("event state lock poisoned".into()))
    }
}
