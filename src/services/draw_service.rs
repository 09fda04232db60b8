use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::draw::RoundError;
use crate::error::{AppError, AppResult};
use crate::models::{
    CommitRoundResponse, DrawStatusResponse, PrizeResponse, RoundPhaseName, StopRoundResponse,
    WinnerRecordResponse,
};
use crate::store::{EventState, EventStore};

#[derive(Clone)]
pub struct DrawService {
    store: Arc<EventStore>,
}

impl DrawService {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// 选择奖品进入抽取（转动中拒绝切换）
    pub fn select(&self, prize_id: Uuid) -> AppResult<DrawStatusResponse> {
        let mut state = self.store.write()?;
        if state.prize(prize_id).is_none() {
            return Err(AppError::NotFound(format!("Prize {prize_id} not found")));
        }
        state.round.select_prize(prize_id)?;
        Ok(Self::status_of(&state))
    }

    /// 离开当前奖品回到 Idle（转动中拒绝）
    pub fn deselect(&self) -> AppResult<DrawStatusResponse> {
        let mut state = self.store.write()?;
        state.round.deselect()?;
        Ok(Self::status_of(&state))
    }

    /// 开始转动。名额与候选池都在锁内实时计算。
    pub fn start(&self) -> AppResult<DrawStatusResponse> {
        let mut state = self.store.write()?;
        let prize_id = state
            .round
            .active_prize()
            .ok_or(RoundError::NoPrizeSelected)?;
        let prize = state
            .prize(prize_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Prize {prize_id} not found")))?;
        let remaining = state.remaining_slots(&prize);
        let eligible_count = state.eligible_participants().len();

        state.round.start(remaining, eligible_count, Utc::now())?;
        log::info!(
            "Round started for prize {} ({remaining} slots remaining, {eligible_count} eligible)",
            prize.name
        );
        Ok(Self::status_of(&state))
    }

    /// 定格：调用引擎计算本轮名单。内定被截断时记录告警并回传数量。
    pub fn stop(&self) -> AppResult<StopRoundResponse> {
        let mut state = self.store.write()?;
        let prize_id = state.round.active_prize().ok_or(RoundError::NotRunning)?;
        let prize = state
            .prize(prize_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Prize {prize_id} not found")))?;
        let remaining = state.remaining_slots(&prize);
        let pool = state.eligible_participants();
        let rules = state.rigged_rules.clone();

        let mut rng = rand::thread_rng();
        let selection = state.round.stop(remaining, &pool, &rules, &mut rng)?;

        if selection.dropped_forced > 0 {
            log::warn!(
                "{} forced winners dropped for prize {}: more rigged rules than remaining slots",
                selection.dropped_forced,
                prize.name
            );
        }
        log::info!(
            "Round settled for prize {}: {} pending winners",
            prize.name,
            selection.winners.len()
        );
        Ok(StopRoundResponse {
            winners: selection.winners,
            dropped_forced: selection.dropped_forced,
        })
    }

    /// 落库：待定名单整体转成中奖记录追加进历史，不存在部分写入。
    pub fn commit(&self) -> AppResult<CommitRoundResponse> {
        let mut state = self.store.write()?;
        let records = state.round.commit(Utc::now())?;

        let committed: Vec<WinnerRecordResponse> = records
            .iter()
            .map(|r| {
                let prize_name = state.prize(r.prize_id).map(|p| p.name.clone());
                WinnerRecordResponse::from_record(r, prize_name)
            })
            .collect();
        state.winners.extend(records);

        let remaining = state
            .round
            .active_prize()
            .and_then(|id| state.prize(id))
            .map(|p| state.remaining_slots(p))
            .unwrap_or(0);
        log::info!(
            "Committed {} winners, {remaining} slots remaining",
            committed.len()
        );
        Ok(CommitRoundResponse {
            committed,
            remaining_slots: remaining,
        })
    }

    /// 丢弃待定名单（不触碰历史与名额）
    pub fn discard(&self) -> AppResult<DrawStatusResponse> {
        let mut state = self.store.write()?;
        state.round.discard()?;
        log::info!("Pending selection discarded");
        Ok(Self::status_of(&state))
    }

    /// 抽奖面板状态
    pub fn status(&self) -> AppResult<DrawStatusResponse> {
        let state = self.store.read()?;
        Ok(Self::status_of(&state))
    }

    fn status_of(state: &EventState) -> DrawStatusResponse {
        let prize = state
            .round
            .active_prize()
            .and_then(|id| state.prize(id))
            .map(|p| PrizeResponse::from_prize(p, state.won_count(p.id)));
        DrawStatusResponse {
            phase: RoundPhaseName::from(state.round.phase()),
            remaining_slots: prize.as_ref().map(|p| p.remaining).unwrap_or(0),
            eligible_count: state.eligible_participants().len(),
            pending: state
                .round
                .pending()
                .map(|p| p.to_vec())
                .unwrap_or_default(),
            dropped_forced: state.round.dropped_forced(),
            prize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddRuleRequest, CreatePrizeRequest, ParticipantImport};
    use crate::services::{ParticipantService, PrizeService, RuleService};
    use std::collections::HashSet;

    struct Fixture {
        store: Arc<EventStore>,
        draw: DrawService,
        prizes: PrizeService,
        rules: RuleService,
    }

    fn fixture(participant_count: usize) -> Fixture {
        let store = Arc::new(EventStore::new());
        let participants = ParticipantService::new(store.clone());
        let rows: Vec<ParticipantImport> = (1..=participant_count)
            .map(|i| ParticipantImport {
                id: format!("p{i}"),
                name: format!("user{i}"),
                department: None,
            })
            .collect();
        if !rows.is_empty() {
            participants.import(rows).unwrap();
        }
        Fixture {
            draw: DrawService::new(store.clone()),
            prizes: PrizeService::new(store.clone()),
            rules: RuleService::new(store.clone()),
            store,
        }
    }

    fn create_prize(f: &Fixture, name: &str, count: u32) -> Uuid {
        f.prizes
            .create(CreatePrizeRequest {
                name: name.to_string(),
                count,
                image: None,
                level: None,
            })
            .unwrap()
            .id
    }

    fn run_one_round(f: &Fixture) -> CommitRoundResponse {
        f.draw.start().unwrap();
        f.draw.stop().unwrap();
        f.draw.commit().unwrap()
    }

    #[test]
    fn no_participant_wins_twice_across_rounds() {
        let f = fixture(6);
        let first = create_prize(&f, "first", 2);
        let second = create_prize(&f, "second", 3);

        f.draw.select(first).unwrap();
        run_one_round(&f);
        f.draw.select(second).unwrap();
        run_one_round(&f);

        let state = f.store.read().unwrap();
        let mut seen = HashSet::new();
        for record in &state.winners {
            assert!(
                seen.insert(record.participant.id.clone()),
                "participant {} won twice",
                record.participant.id
            );
        }
        assert_eq!(state.winners.len(), 5);
    }

    #[test]
    fn committed_winners_never_exceed_prize_stock() {
        let f = fixture(20);
        let prize_id = create_prize(&f, "limited", 3);
        f.draw.select(prize_id).unwrap();

        // 多轮连抽直到名额耗尽
        let commit = run_one_round(&f);
        assert_eq!(commit.committed.len(), 3);
        assert_eq!(commit.remaining_slots, 0);

        let state = f.store.read().unwrap();
        assert_eq!(state.won_count(prize_id), 3);
        drop(state);

        // 名额已尽，再次开始被拒绝
        let err = f.draw.start().unwrap_err();
        assert!(matches!(
            err,
            AppError::RoundRejected(RoundError::NoRemainingSlots)
        ));
    }

    #[test]
    fn sequential_rounds_drain_stock_without_overflow() {
        let f = fixture(30);
        // 名额 15：第一轮按硬上限取 10，第二轮取剩余 5
        let prize_id = create_prize(&f, "big", 15);
        f.draw.select(prize_id).unwrap();

        let first = run_one_round(&f);
        assert_eq!(first.committed.len(), 10);
        assert_eq!(first.remaining_slots, 5);

        let second = run_one_round(&f);
        assert_eq!(second.committed.len(), 5);
        assert_eq!(second.remaining_slots, 0);
    }

    #[test]
    fn forced_rules_take_precedence_end_to_end() {
        let f = fixture(10);
        let prize_id = create_prize(&f, "rigged", 2);
        for id in ["p3", "p7"] {
            f.rules
                .add(AddRuleRequest {
                    prize_id,
                    participant_id: id.to_string(),
                })
                .unwrap();
        }

        f.draw.select(prize_id).unwrap();
        f.draw.start().unwrap();
        let stopped = f.draw.stop().unwrap();

        let ids: Vec<&str> = stopped.winners.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p7"]);
        assert_eq!(stopped.dropped_forced, 0);
    }

    #[test]
    fn forced_overflow_surfaces_dropped_count() {
        let f = fixture(10);
        let prize_id = create_prize(&f, "oversub", 2);
        for id in ["p1", "p2", "p3"] {
            f.rules
                .add(AddRuleRequest {
                    prize_id,
                    participant_id: id.to_string(),
                })
                .unwrap();
        }

        f.draw.select(prize_id).unwrap();
        f.draw.start().unwrap();
        let stopped = f.draw.stop().unwrap();

        assert_eq!(stopped.dropped_forced, 1);
        let ids: Vec<&str> = stopped.winners.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);

        let status = f.draw.status().unwrap();
        assert_eq!(status.dropped_forced, 1);
    }

    #[test]
    fn discard_leaves_history_and_slots_untouched() {
        let f = fixture(5);
        let prize_id = create_prize(&f, "p", 2);
        f.draw.select(prize_id).unwrap();

        let before = f.draw.status().unwrap();
        f.draw.start().unwrap();
        f.draw.stop().unwrap();
        f.draw.discard().unwrap();
        let after = f.draw.status().unwrap();

        assert_eq!(after.phase, RoundPhaseName::Selected);
        assert_eq!(after.remaining_slots, before.remaining_slots);
        assert_eq!(after.eligible_count, before.eligible_count);
        assert!(after.pending.is_empty());
        assert!(f.store.read().unwrap().winners.is_empty());
    }

    #[test]
    fn commit_appends_exactly_pending_size_with_distinct_ids() {
        let f = fixture(8);
        let prize_id = create_prize(&f, "p", 4);
        f.draw.select(prize_id).unwrap();
        f.draw.start().unwrap();
        let started = f.store.read().unwrap().round.started_at().unwrap();
        let stopped = f.draw.stop().unwrap();

        let commit = f.draw.commit().unwrap();
        assert_eq!(commit.committed.len(), stopped.winners.len());

        let state = f.store.read().unwrap();
        assert_eq!(state.winners.len(), stopped.winners.len());
        let ids: HashSet<Uuid> = state.winners.iter().map(|w| w.id).collect();
        assert_eq!(ids.len(), state.winners.len());
        for record in &state.winners {
            assert!(record.won_at >= started);
        }
    }

    #[test]
    fn start_rejected_when_pool_exhausted() {
        let f = fixture(2);
        let first = create_prize(&f, "first", 2);
        let second = create_prize(&f, "second", 1);

        f.draw.select(first).unwrap();
        run_one_round(&f);

        // 两名参与者都已中奖，候选池为空
        f.draw.select(second).unwrap();
        let err = f.draw.start().unwrap_err();
        assert!(matches!(err, AppError::RoundRejected(RoundError::EmptyPool)));
    }

    #[test]
    fn select_unknown_prize_is_not_found() {
        let f = fixture(1);
        assert!(matches!(
            f.draw.select(Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn commit_without_pending_is_rejected() {
        let f = fixture(3);
        let prize_id = create_prize(&f, "p", 1);
        f.draw.select(prize_id).unwrap();
        let err = f.draw.commit().unwrap_err();
        assert!(matches!(
            err,
            AppError::RoundRejected(RoundError::NothingPending)
        ));
    }

    #[test]
    fn status_reflects_phase_progression() {
        let f = fixture(4);
        let prize_id = create_prize(&f, "p", 2);

        assert_eq!(f.draw.status().unwrap().phase, RoundPhaseName::Idle);
        f.draw.select(prize_id).unwrap();
        assert_eq!(f.draw.status().unwrap().phase, RoundPhaseName::Selected);
        f.draw.start().unwrap();
        assert_eq!(f.draw.status().unwrap().phase, RoundPhaseName::Running);
        f.draw.stop().unwrap();
        let status = f.draw.status().unwrap();
        assert_eq!(status.phase, RoundPhaseName::Settled);
        assert_eq!(status.pending.len(), 2);
        f.draw.commit().unwrap();
        assert_eq!(f.draw.status().unwrap().phase, RoundPhaseName::Selected);
    }
}
