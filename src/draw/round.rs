//! 轮次状态机：Idle → Selected → Running → Settled → (落库) → Selected。
//!
//! 全系统同一时刻至多一个活动轮次；Running 期间拒绝一切离开当前奖品
//! 的操作，定格（stop）到落库（commit）之间的名单随时可以丢弃重抽。

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use super::engine::{self, DrawSelection, MAX_DRAW_PER_ROUND};
use crate::models::{Participant, RiggedRule, WinnerRecord};

/// 被拒绝的状态迁移。拒绝不改变任何状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error("no prize selected for drawing")]
    NoPrizeSelected,
    #[error("a spin is already running")]
    AlreadyRunning,
    #[error("no spin is running")]
    NotRunning,
    #[error("prize has no remaining slots")]
    NoRemainingSlots,
    #[error("eligible pool is empty")]
    EmptyPool,
    #[error("no pending selection")]
    NothingPending,
    #[error("cannot leave the prize while a spin is running")]
    RoundInProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoundPhase {
    #[default]
    Idle,
    Selected {
        prize_id: Uuid,
    },
    Running {
        prize_id: Uuid,
        started_at: DateTime<Utc>,
    },
    Settled {
        prize_id: Uuid,
        started_at: DateTime<Utc>,
        pending: Vec<Participant>,
        dropped_forced: usize,
    },
}

#[derive(Debug, Default)]
pub struct RoundController {
    phase: RoundPhase,
}

impl RoundController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, RoundPhase::Running { .. })
    }

    /// 当前选中的奖品（Idle 时为空）
    pub fn active_prize(&self) -> Option<Uuid> {
        match self.phase {
            RoundPhase::Idle => None,
            RoundPhase::Selected { prize_id }
            | RoundPhase::Running { prize_id, .. }
            | RoundPhase::Settled { prize_id, .. } => Some(prize_id),
        }
    }

    /// 已定格、尚未落库的名单
    pub fn pending(&self) -> Option<&[Participant]> {
        match &self.phase {
            RoundPhase::Settled { pending, .. } => Some(pending),
            _ => None,
        }
    }

    pub fn dropped_forced(&self) -> usize {
        match &self.phase {
            RoundPhase::Settled { dropped_forced, .. } => *dropped_forced,
            _ => 0,
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        match self.phase {
            RoundPhase::Running { started_at, .. } | RoundPhase::Settled { started_at, .. } => {
                Some(started_at)
            }
            _ => None,
        }
    }

    /// 选择奖品进入抽取。Running 期间拒绝；未落库的名单随之丢弃。
    pub fn select_prize(&mut self, prize_id: Uuid) -> Result<(), RoundError> {
        if self.is_running() {
            return Err(RoundError::RoundInProgress);
        }
        self.phase = RoundPhase::Selected { prize_id };
        Ok(())
    }

    /// 离开当前奖品回到 Idle。Running 期间拒绝。
    pub fn deselect(&mut self) -> Result<(), RoundError> {
        if self.is_running() {
            return Err(RoundError::RoundInProgress);
        }
        self.phase = RoundPhase::Idle;
        Ok(())
    }

    /// 开始转动。名额或候选池为空时拒绝；
    /// 从 Settled 再次开始即丢弃未落库名单。
    pub fn start(
        &mut self,
        remaining_slots: u32,
        eligible_count: usize,
        now: DateTime<Utc>,
    ) -> Result<(), RoundError> {
        let prize_id = match self.phase {
            RoundPhase::Selected { prize_id } | RoundPhase::Settled { prize_id, .. } => prize_id,
            RoundPhase::Running { .. } => return Err(RoundError::AlreadyRunning),
            RoundPhase::Idle => return Err(RoundError::NoPrizeSelected),
        };
        if remaining_slots == 0 {
            return Err(RoundError::NoRemainingSlots);
        }
        if eligible_count == 0 {
            return Err(RoundError::EmptyPool);
        }
        self.phase = RoundPhase::Running {
            prize_id,
            started_at: now,
        };
        Ok(())
    }

    /// 定格：调用引擎计算本轮名单并进入 Settled。
    /// 名额按 min(剩余, 硬上限) 截取，结果同时保存为待定名单。
    pub fn stop<R: Rng>(
        &mut self,
        remaining_slots: u32,
        eligible_pool: &[Participant],
        rules: &[RiggedRule],
        rng: &mut R,
    ) -> Result<DrawSelection, RoundError> {
        let (prize_id, started_at) = match self.phase {
            RoundPhase::Running {
                prize_id,
                started_at,
            } => (prize_id, started_at),
            _ => return Err(RoundError::NotRunning),
        };
        let requested = (remaining_slots as usize).min(MAX_DRAW_PER_ROUND);
        let selection = engine::select_winners(prize_id, requested, eligible_pool, rules, rng);
        self.phase = RoundPhase::Settled {
            prize_id,
            started_at,
            pending: selection.winners.clone(),
            dropped_forced: selection.dropped_forced,
        };
        Ok(selection)
    }

    /// 落库：把待定名单整体转成中奖记录返回给调用方追加，
    /// 每条记录分配新 id 与注入的时间戳，轮次回到 Selected。
    pub fn commit(&mut self, now: DateTime<Utc>) -> Result<Vec<WinnerRecord>, RoundError> {
        let (prize_id, pending) = match &mut self.phase {
            RoundPhase::Settled {
                prize_id, pending, ..
            } => (*prize_id, std::mem::take(pending)),
            _ => return Err(RoundError::NothingPending),
        };
        let records = pending
            .into_iter()
            .map(|participant| WinnerRecord {
                id: Uuid::new_v4(),
                participant,
                prize_id,
                won_at: now,
            })
            .collect();
        self.phase = RoundPhase::Selected { prize_id };
        Ok(records)
    }

    /// 丢弃待定名单回到 Selected，不触碰任何历史。
    pub fn discard(&mut self) -> Result<(), RoundError> {
        match self.phase {
            RoundPhase::Settled { prize_id, .. } => {
                self.phase = RoundPhase::Selected { prize_id };
                Ok(())
            }
            _ => Err(RoundError::NothingPending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn participant(id: &str) -> Participant {
        Participant {
            id: id.to_string(),
            name: format!("user-{id}"),
            department: None,
        }
    }

    fn pool(ids: &[&str]) -> Vec<Participant> {
        ids.iter().map(|id| participant(id)).collect()
    }

    #[test]
    fn full_round_lifecycle() {
        let prize_id = Uuid::new_v4();
        let mut round = RoundController::new();
        let pool = pool(&["a", "b", "c"]);

        round.select_prize(prize_id).unwrap();
        assert_eq!(round.active_prize(), Some(prize_id));

        let started = Utc::now();
        round.start(2, pool.len(), started).unwrap();
        assert!(round.is_running());

        let mut rng = StdRng::seed_from_u64(1);
        let selection = round.stop(2, &pool, &[], &mut rng).unwrap();
        assert_eq!(selection.winners.len(), 2);
        assert_eq!(round.pending().unwrap().len(), 2);

        let records = round.commit(Utc::now()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(round.pending().is_none());
        assert_eq!(round.active_prize(), Some(prize_id));
    }

    #[test]
    fn start_rejected_without_prize() {
        let mut round = RoundController::new();
        assert_eq!(
            round.start(1, 1, Utc::now()),
            Err(RoundError::NoPrizeSelected)
        );
    }

    #[test]
    fn start_rejected_with_no_slots_or_empty_pool() {
        let prize_id = Uuid::new_v4();
        let mut round = RoundController::new();
        round.select_prize(prize_id).unwrap();

        assert_eq!(
            round.start(0, 5, Utc::now()),
            Err(RoundError::NoRemainingSlots)
        );
        assert_eq!(round.start(3, 0, Utc::now()), Err(RoundError::EmptyPool));
        // 拒绝不改变状态
        assert_eq!(round.phase(), &RoundPhase::Selected { prize_id });
    }

    #[test]
    fn double_start_rejected() {
        let prize_id = Uuid::new_v4();
        let mut round = RoundController::new();
        round.select_prize(prize_id).unwrap();
        round.start(1, 1, Utc::now()).unwrap();
        assert_eq!(
            round.start(1, 1, Utc::now()),
            Err(RoundError::AlreadyRunning)
        );
    }

    #[test]
    fn navigation_rejected_while_running() {
        let prize_id = Uuid::new_v4();
        let mut round = RoundController::new();
        round.select_prize(prize_id).unwrap();
        round.start(1, 1, Utc::now()).unwrap();

        assert_eq!(round.deselect(), Err(RoundError::RoundInProgress));
        assert_eq!(
            round.select_prize(Uuid::new_v4()),
            Err(RoundError::RoundInProgress)
        );
        assert!(round.is_running());
    }

    #[test]
    fn stop_rejected_when_not_running() {
        let prize_id = Uuid::new_v4();
        let mut round = RoundController::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            round.stop(1, &pool(&["a"]), &[], &mut rng),
            Err(RoundError::NotRunning)
        );
        round.select_prize(prize_id).unwrap();
        assert_eq!(
            round.stop(1, &pool(&["a"]), &[], &mut rng),
            Err(RoundError::NotRunning)
        );
    }

    #[test]
    fn commit_rejected_without_pending() {
        let prize_id = Uuid::new_v4();
        let mut round = RoundController::new();
        assert_eq!(round.commit(Utc::now()), Err(RoundError::NothingPending));
        round.select_prize(prize_id).unwrap();
        assert_eq!(round.commit(Utc::now()), Err(RoundError::NothingPending));
    }

    #[test]
    fn commit_records_have_distinct_ids_and_timestamps_after_start() {
        let prize_id = Uuid::new_v4();
        let mut round = RoundController::new();
        let pool = pool(&["a", "b", "c", "d"]);

        round.select_prize(prize_id).unwrap();
        let started = Utc::now();
        round.start(4, pool.len(), started).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        round.stop(4, &pool, &[], &mut rng).unwrap();

        let records = round.commit(Utc::now()).unwrap();
        assert_eq!(records.len(), 4);
        let mut ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
        for record in &records {
            assert!(record.won_at >= started);
            assert_eq!(record.prize_id, prize_id);
        }
    }

    #[test]
    fn restart_from_settled_discards_pending() {
        let prize_id = Uuid::new_v4();
        let mut round = RoundController::new();
        let pool = pool(&["a", "b", "c"]);

        round.select_prize(prize_id).unwrap();
        round.start(2, pool.len(), Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        round.stop(2, &pool, &[], &mut rng).unwrap();
        assert!(round.pending().is_some());

        round.start(2, pool.len(), Utc::now()).unwrap();
        assert!(round.is_running());
        assert!(round.pending().is_none());
    }

    #[test]
    fn discard_returns_to_selected() {
        let prize_id = Uuid::new_v4();
        let mut round = RoundController::new();
        let pool = pool(&["a", "b"]);

        round.select_prize(prize_id).unwrap();
        round.start(1, pool.len(), Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        round.stop(1, &pool, &[], &mut rng).unwrap();

        round.discard().unwrap();
        assert_eq!(round.phase(), &RoundPhase::Selected { prize_id });
        assert_eq!(round.discard(), Err(RoundError::NothingPending));
    }

    #[test]
    fn stop_reports_dropped_forced() {
        let prize_id = Uuid::new_v4();
        let mut round = RoundController::new();
        let pool = pool(&["a", "b", "c"]);
        let rules: Vec<RiggedRule> = ["a", "b", "c"]
            .iter()
            .map(|id| RiggedRule {
                prize_id,
                participant_id: id.to_string(),
            })
            .collect();

        round.select_prize(prize_id).unwrap();
        round.start(2, pool.len(), Utc::now()).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let selection = round.stop(2, &pool, &rules, &mut rng).unwrap();

        assert_eq!(selection.dropped_forced, 1);
        assert_eq!(round.dropped_forced(), 1);
        let ids: Vec<&str> = selection.winners.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
